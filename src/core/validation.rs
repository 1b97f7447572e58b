use rust_decimal::Decimal;

use super::checked;
use super::error::ValidationError;
use super::finalize::grand_total;
use super::types::*;

/// Validate a single line. Appends to `errors`.
///
/// These checks are advisory: the pipeline computes totals for lines that
/// fail them. [`compute_checked`](super::compute_checked) turns them into an
/// error.
pub fn validate_line(item: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("lines[{index}]");

    if item.quantity.is_sign_negative() && !item.quantity.is_zero() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.quantity"),
            format!("quantity must not be negative, got: {}", item.quantity),
            "LINE-01",
        ));
    }

    if item.unit_price.is_sign_negative() && !item.unit_price.is_zero() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unit_price"),
            format!("unit price must not be negative, got: {}", item.unit_price),
            "LINE-02",
        ));
    }

    if let Some(discount) = &item.discount {
        validate_discount(discount, &format!("{prefix}.discount"), "LINE-03", errors);
    }

    for (i, tax) in item.special_taxes.iter().enumerate() {
        if !is_valid_percentage(tax.rate) {
            errors.push(ValidationError::with_rule(
                format!("{prefix}.special_taxes[{i}].rate"),
                format!(
                    "{} rate must be between 0 and 100, got: {}",
                    tax.kind.code(),
                    tax.rate
                ),
                "LINE-04",
            ));
        }
    }

    if !is_valid_percentage(item.vat_rate) {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.vat_rate"),
            format!("VAT rate must be between 0 and 100, got: {}", item.vat_rate),
            "LINE-05",
        ));
    }
}

/// Validate document settings.
/// Returns all validation errors found (not just the first).
pub fn validate_settings(settings: &DocumentSettings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_currency(&settings.currency_code, "currency_code", &mut errors);
    validate_currency(
        &settings.reporting_currency_code,
        "reporting_currency_code",
        &mut errors,
    );

    if !settings.same_currency() && settings.exchange_rate <= Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            "exchange_rate",
            format!(
                "exchange rate must be positive when converting {} to {}, got: {}",
                settings.currency_code, settings.reporting_currency_code, settings.exchange_rate
            ),
            "SET-02",
        ));
    }

    if let Some(discount) = &settings.document_discount {
        validate_discount(discount, "document_discount", "SET-03", &mut errors);
    }

    match settings.withholding {
        WithholdingConfig::None => {}
        WithholdingConfig::Purchase { percentage } => {
            if !is_valid_percentage(percentage) {
                errors.push(ValidationError::with_rule(
                    "withholding.percentage",
                    format!("withholding percentage must be between 0 and 100, got: {percentage}"),
                    "SET-04",
                ));
            }
        }
        WithholdingConfig::Sales {
            stopaj_percentage,
            vat_withholding,
        } => {
            if !is_valid_percentage(stopaj_percentage) {
                errors.push(ValidationError::with_rule(
                    "withholding.stopaj_percentage",
                    format!(
                        "stopaj percentage must be between 0 and 100, got: {stopaj_percentage}"
                    ),
                    "SET-04",
                ));
            }
            if let Some(w) = vat_withholding {
                if w.denominator == 0 {
                    errors.push(ValidationError::with_rule(
                        "withholding.vat_withholding",
                        format!("VAT withholding denominator must not be zero ({w})"),
                        "SET-05",
                    ));
                } else if w.numerator > w.denominator {
                    errors.push(ValidationError::with_rule(
                        "withholding.vat_withholding",
                        format!("VAT withholding cannot exceed the whole VAT amount ({w})"),
                        "SET-05",
                    ));
                }
            }
        }
    }

    errors
}

/// Check that computed totals are internally consistent.
pub fn validate_arithmetic(totals: &DocumentTotals) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let expected_discounted = checked::sub(
        checked::sub(totals.sub_total, totals.line_discount_total),
        totals.document_discount,
    );
    if totals.discounted_sub_total != expected_discounted {
        errors.push(ValidationError::with_rule(
            "discounted_sub_total",
            format!(
                "discounted subtotal {} does not match {} - {} - {}",
                totals.discounted_sub_total,
                totals.sub_total,
                totals.line_discount_total,
                totals.document_discount
            ),
            "TOT-01",
        ));
    }

    let breakdown_vat_total = checked::sum(totals.vat_breakdown.iter().map(|b| b.vat_amount));
    if totals.vat_total != breakdown_vat_total {
        errors.push(ValidationError::with_rule(
            "vat_total",
            format!(
                "VAT total {} does not match sum of breakdown amounts {}",
                totals.vat_total, breakdown_vat_total
            ),
            "TOT-02",
        ));
    }

    let expected_grand = grand_total(
        expected_discounted,
        totals.special_tax_total(),
        totals.vat_total,
        totals.withholding_tax,
        totals.vat_withholding,
    );
    if totals.grand_total != expected_grand {
        errors.push(ValidationError::with_rule(
            "grand_total",
            format!(
                "grand total {} does not match calculation {}",
                totals.grand_total, expected_grand
            ),
            "TOT-03",
        ));
    }

    let expected_reporting = checked::mul(totals.grand_total, totals.exchange_rate);
    if totals.reporting_currency_total != expected_reporting {
        errors.push(ValidationError::with_rule(
            "reporting_currency_total",
            format!(
                "reporting total {} does not match grand total {} × rate {}",
                totals.reporting_currency_total, totals.grand_total, totals.exchange_rate
            ),
            "TOT-04",
        ));
    }

    errors
}

fn validate_currency(code: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if code.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            field,
            "currency code must not be empty",
            "SET-01",
        ));
    } else if code.len() != 3 {
        errors.push(ValidationError::with_rule(
            field,
            "currency code must be 3 characters (ISO 4217)",
            "SET-01",
        ));
    } else if !super::currencies::is_known_currency_code(code) {
        errors.push(ValidationError::with_rule(
            field,
            format!("currency code '{code}' is not a known ISO 4217 code"),
            "SET-01",
        ));
    }
}

fn validate_discount(
    discount: &Discount,
    field: &str,
    rule: &str,
    errors: &mut Vec<ValidationError>,
) {
    if discount.is_percentage {
        if !is_valid_percentage(discount.value) {
            errors.push(ValidationError::with_rule(
                format!("{field}.value"),
                format!(
                    "discount percentage must be between 0 and 100, got: {}",
                    discount.value
                ),
                rule,
            ));
        }
    } else if discount.value.is_sign_negative() && !discount.value.is_zero() {
        errors.push(ValidationError::with_rule(
            format!("{field}.value"),
            format!("discount amount must not be negative, got: {}", discount.value),
            rule,
        ));
    }
}

fn is_valid_percentage(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE_HUNDRED
}
