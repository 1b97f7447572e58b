use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::FaturaError;
use super::input::parse_decimal;
use super::types::*;
use super::validation;

/// Builder for LineItem.
///
/// ```
/// use fatura::core::*;
/// use rust_decimal_macros::dec;
///
/// let line = LineItemBuilder::new(dec!(2), dec!(100))
///     .discount_percentage(dec!(10))
///     .vat(dec!(18))
///     .build();
///
/// assert_eq!(calculate_item_total(&line), dec!(212.4));
/// ```
pub struct LineItemBuilder {
    quantity: Decimal,
    unit_price: Decimal,
    discount: Option<Discount>,
    special_taxes: Vec<SpecialTax>,
    vat_rate: Decimal,
    vat_exempt: bool,
}

impl LineItemBuilder {
    pub fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            discount: None,
            special_taxes: Vec::new(),
            vat_rate: Decimal::ZERO,
            vat_exempt: false,
        }
    }

    /// Start from raw form text; unparsable values become zero.
    pub fn from_text(quantity: &str, unit_price: &str) -> Self {
        Self::new(parse_decimal(quantity), parse_decimal(unit_price))
    }

    pub fn discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn discount_percentage(self, percent: Decimal) -> Self {
        self.discount(Discount::percentage(percent))
    }

    pub fn discount_fixed(self, amount: Decimal) -> Self {
        self.discount(Discount::fixed(amount))
    }

    pub fn special_tax(mut self, kind: SpecialTaxKind, rate: Decimal) -> Self {
        self.special_taxes.push(SpecialTax::new(kind, rate));
        self
    }

    pub fn excise(self, rate: Decimal) -> Self {
        self.special_tax(SpecialTaxKind::Excise, rate)
    }

    pub fn communication_tax(self, rate: Decimal) -> Self {
        self.special_tax(SpecialTaxKind::Communication, rate)
    }

    pub fn accommodation_tax(self, rate: Decimal) -> Self {
        self.special_tax(SpecialTaxKind::Accommodation, rate)
    }

    pub fn vat(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    pub fn vat_exempt(mut self) -> Self {
        self.vat_exempt = true;
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount: self.discount,
            special_taxes: self.special_taxes,
            vat_rate: self.vat_rate,
            vat_exempt: self.vat_exempt,
        }
    }
}

/// Builder for DocumentSettings.
///
/// ```
/// use fatura::core::*;
/// use rust_decimal_macros::dec;
///
/// let settings = DocumentSettingsBuilder::new("USD")
///     .reporting_currency("TRY")
///     .exchange_rate(dec!(32.5))
///     .vat_withholding(VatWithholding::new(5, 10))
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.effective_exchange_rate(), dec!(32.5));
/// ```
pub struct DocumentSettingsBuilder {
    currency_code: String,
    reporting_currency_code: Option<String>,
    exchange_rate: Decimal,
    exchange_rate_date: Option<NaiveDate>,
    document_discount: Option<Discount>,
    withholding: WithholdingConfig,
}

impl DocumentSettingsBuilder {
    pub fn new(currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
            reporting_currency_code: None,
            exchange_rate: Decimal::ONE,
            exchange_rate_date: None,
            document_discount: None,
            withholding: WithholdingConfig::None,
        }
    }

    /// Reporting currency; defaults to [`DEFAULT_CURRENCY`].
    pub fn reporting_currency(mut self, code: impl Into<String>) -> Self {
        self.reporting_currency_code = Some(code.into());
        self
    }

    pub fn exchange_rate(mut self, rate: Decimal) -> Self {
        self.exchange_rate = rate;
        self
    }

    pub fn exchange_rate_date(mut self, date: NaiveDate) -> Self {
        self.exchange_rate_date = Some(date);
        self
    }

    pub fn document_discount(mut self, discount: Discount) -> Self {
        self.document_discount = Some(discount);
        self
    }

    /// Purchase-invoice withholding: `percentage` of the VAT total.
    pub fn purchase_withholding(mut self, percentage: Decimal) -> Self {
        self.withholding = WithholdingConfig::Purchase { percentage };
        self
    }

    /// Sales-invoice stopaj on the discounted subtotal. Keeps any VAT
    /// withholding already set.
    pub fn stopaj(mut self, percentage: Decimal) -> Self {
        let vat_withholding = match self.withholding {
            WithholdingConfig::Sales {
                vat_withholding, ..
            } => vat_withholding,
            _ => None,
        };
        self.withholding = WithholdingConfig::Sales {
            stopaj_percentage: percentage,
            vat_withholding,
        };
        self
    }

    /// Sales-invoice VAT withholding. Keeps any stopaj already set.
    pub fn vat_withholding(mut self, ratio: VatWithholding) -> Self {
        let stopaj_percentage = match self.withholding {
            WithholdingConfig::Sales {
                stopaj_percentage, ..
            } => stopaj_percentage,
            _ => Decimal::ZERO,
        };
        self.withholding = WithholdingConfig::Sales {
            stopaj_percentage,
            vat_withholding: Some(ratio),
        };
        self
    }

    /// Build the settings, running validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<DocumentSettings, FaturaError> {
        let settings = self.build_unchecked()?;
        let errors = validation::validate_settings(&settings);
        if !errors.is_empty() {
            return Err(FaturaError::from_validation(&errors));
        }
        Ok(settings)
    }

    /// Build without validation.
    pub fn build_unchecked(self) -> Result<DocumentSettings, FaturaError> {
        if self.currency_code.trim().is_empty() {
            return Err(FaturaError::Builder("currency code is required".into()));
        }
        Ok(DocumentSettings {
            currency_code: self.currency_code.trim().to_ascii_uppercase(),
            reporting_currency_code: self
                .reporting_currency_code
                .map(|c| c.trim().to_ascii_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            exchange_rate: self.exchange_rate,
            exchange_rate_date: self.exchange_rate_date,
            document_discount: self.document_discount,
            withholding: self.withholding,
        })
    }
}
