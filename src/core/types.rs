use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::checked;
use super::input::lenient_decimal;

/// A single invoice line as entered on the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// Invoiced quantity (positive expected, not enforced).
    #[serde(deserialize_with = "lenient_decimal")]
    pub quantity: Decimal,
    /// Net unit price.
    #[serde(deserialize_with = "lenient_decimal")]
    pub unit_price: Decimal,
    /// Line discount; `None` means no discount.
    pub discount: Option<Discount>,
    /// Special taxes applied on top of the discounted price, before VAT.
    pub special_taxes: Vec<SpecialTax>,
    /// VAT rate in percent.
    #[serde(deserialize_with = "lenient_decimal")]
    pub vat_rate: Decimal,
    /// When set, the line carries no VAT regardless of `vat_rate`.
    pub vat_exempt: bool,
}

impl LineItem {
    /// Special taxes in application order: excise, communication,
    /// accommodation. Taxes of the same kind keep their entry order.
    pub fn sorted_special_taxes(&self) -> Vec<SpecialTax> {
        let mut taxes = self.special_taxes.clone();
        taxes.sort_by_key(|t| t.kind);
        taxes
    }
}

/// Percentage or fixed-amount discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Discount {
    /// Percent when `is_percentage`, otherwise an absolute amount.
    #[serde(deserialize_with = "lenient_decimal")]
    pub value: Decimal,
    pub is_percentage: bool,
}

impl Discount {
    pub fn percentage(value: Decimal) -> Self {
        Self {
            value,
            is_percentage: true,
        }
    }

    pub fn fixed(value: Decimal) -> Self {
        Self {
            value,
            is_percentage: false,
        }
    }

    /// Discount amount taken off `base`.
    pub fn amount_of(&self, base: Decimal) -> Decimal {
        if self.is_percentage {
            checked::percent_of(base, self.value)
        } else {
            self.value
        }
    }
}

/// Kinds of special (excise-style) tax. The declaration order is the
/// application order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum SpecialTaxKind {
    /// ÖTV — special consumption tax.
    #[default]
    Excise,
    /// ÖİV — special communication tax.
    Communication,
    /// Konaklama vergisi — accommodation tax.
    Accommodation,
}

impl SpecialTaxKind {
    pub const ALL: [SpecialTaxKind; 3] = [Self::Excise, Self::Communication, Self::Accommodation];

    /// Short code used on printed invoices.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Excise => "OTV",
            Self::Communication => "OIV",
            Self::Accommodation => "KV",
        }
    }

    /// Parse from the short code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "OTV" | "ÖTV" => Some(Self::Excise),
            "OIV" | "ÖİV" => Some(Self::Communication),
            "KV" => Some(Self::Accommodation),
            _ => None,
        }
    }
}

/// One special tax on a line, as a percentage of the running line amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialTax {
    pub kind: SpecialTaxKind,
    #[serde(deserialize_with = "lenient_decimal")]
    pub rate: Decimal,
}

impl SpecialTax {
    pub fn new(kind: SpecialTaxKind, rate: Decimal) -> Self {
        Self { kind, rate }
    }
}

/// Every intermediate figure of one line's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBreakdown {
    /// quantity × unit price.
    pub base: Decimal,
    /// Line discount amount.
    pub discount: Decimal,
    /// base − discount.
    pub after_discount: Decimal,
    /// Special tax amounts in application order.
    pub special_taxes: Vec<SpecialTaxAmount>,
    /// after_discount + all special taxes; the VAT base.
    pub vat_base: Decimal,
    /// VAT rate actually applied (zero when exempt).
    pub vat_rate: Decimal,
    /// VAT amount.
    pub vat: Decimal,
    /// vat_base + vat.
    pub total: Decimal,
}

/// A computed special tax amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTaxAmount {
    pub kind: SpecialTaxKind,
    pub rate: Decimal,
    /// Running line amount the rate was applied to.
    pub base: Decimal,
    pub amount: Decimal,
}

/// VAT summed per rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatBreakdown {
    /// VAT rate in percent.
    pub rate: Decimal,
    /// Sum of the VAT bases of the lines at this rate.
    pub taxable_amount: Decimal,
    /// Sum of the VAT of the lines at this rate.
    pub vat_amount: Decimal,
}

/// Special tax summed per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTaxTotal {
    pub kind: SpecialTaxKind,
    pub amount: Decimal,
}

/// Output of the aggregation stage: line figures summed, no document-level
/// adjustments yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedTotals {
    /// Σ quantity × unit price.
    pub sub_total: Decimal,
    /// Σ line discounts.
    pub line_discount_total: Decimal,
    /// Special taxes per kind, in application order. Kinds that never
    /// occurred are omitted.
    pub special_tax_totals: Vec<SpecialTaxTotal>,
    /// VAT per rate, ascending. Exempt lines are not included.
    pub vat_breakdown: Vec<VatBreakdown>,
    /// Number of lines aggregated.
    pub line_count: usize,
}

impl AggregatedTotals {
    /// Σ special tax totals across kinds.
    pub fn special_tax_total(&self) -> Decimal {
        checked::sum(self.special_tax_totals.iter().map(|t| t.amount))
    }

    /// Special tax total for one kind (zero when absent).
    pub fn special_tax(&self, kind: SpecialTaxKind) -> Decimal {
        self.special_tax_totals
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Σ VAT breakdown amounts.
    pub fn vat_total(&self) -> Decimal {
        checked::sum(self.vat_breakdown.iter().map(|b| b.vat_amount))
    }
}

/// Document-level settings entered alongside the line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Document currency code (ISO 4217).
    pub currency_code: String,
    /// Currency the reporting total is expressed in.
    pub reporting_currency_code: String,
    /// Units of reporting currency per unit of document currency.
    /// Ignored when both currencies are the same.
    #[serde(deserialize_with = "lenient_decimal")]
    pub exchange_rate: Decimal,
    /// Date the exchange rate was taken, for display only.
    pub exchange_rate_date: Option<NaiveDate>,
    /// Extra discount on the subtotal after line discounts.
    pub document_discount: Option<Discount>,
    /// Withholding rule for the document type.
    pub withholding: WithholdingConfig,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            currency_code: DEFAULT_CURRENCY.to_string(),
            reporting_currency_code: DEFAULT_CURRENCY.to_string(),
            exchange_rate: Decimal::ONE,
            exchange_rate_date: None,
            document_discount: None,
            withholding: WithholdingConfig::None,
        }
    }
}

/// Currency used when none is configured.
pub const DEFAULT_CURRENCY: &str = "TRY";

impl DocumentSettings {
    /// Purchase invoice defaults: withholding as a percentage of VAT.
    pub fn purchase(withholding_percentage: Decimal) -> Self {
        Self {
            withholding: WithholdingConfig::Purchase {
                percentage: withholding_percentage,
            },
            ..Self::default()
        }
    }

    /// Sales invoice defaults: stopaj on the discounted subtotal plus an
    /// optional VAT withholding fraction.
    pub fn sales(stopaj_percentage: Decimal, vat_withholding: Option<VatWithholding>) -> Self {
        Self {
            withholding: WithholdingConfig::Sales {
                stopaj_percentage,
                vat_withholding,
            },
            ..Self::default()
        }
    }

    /// Whether the document and reporting currencies are the same
    /// (case-insensitive).
    pub fn same_currency(&self) -> bool {
        self.currency_code
            .trim()
            .eq_ignore_ascii_case(self.reporting_currency_code.trim())
    }

    /// Exchange rate actually applied: 1 for same-currency documents.
    pub fn effective_exchange_rate(&self) -> Decimal {
        if self.same_currency() {
            Decimal::ONE
        } else {
            self.exchange_rate
        }
    }
}

/// How withholding is deducted from the grand total.
///
/// Purchase and sales invoices use different rules and are kept apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WithholdingConfig {
    /// No withholding.
    #[default]
    None,
    /// Withholding tax as a percentage of the VAT total.
    Purchase {
        #[serde(deserialize_with = "lenient_decimal")]
        percentage: Decimal,
    },
    /// Stopaj as a percentage of the discounted subtotal (before special
    /// taxes), plus a VAT withholding fraction of the VAT total.
    Sales {
        #[serde(default, deserialize_with = "lenient_decimal")]
        stopaj_percentage: Decimal,
        #[serde(default)]
        vat_withholding: Option<VatWithholding>,
    },
}

/// VAT withholding expressed as `numerator / denominator` of the VAT total
/// (e.g. 9/10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatWithholding {
    pub numerator: u32,
    pub denominator: u32,
}

impl VatWithholding {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// The withheld share of VAT; zero when the denominator is zero.
    pub fn fraction(&self) -> Decimal {
        self.checked_denominator()
            .map(|d| checked::div(Decimal::from(self.numerator), d))
            .unwrap_or(Decimal::ZERO)
    }

    /// Withheld amount of `vat_total`; zero when the denominator is zero.
    ///
    /// Multiplies before dividing so fractions such as 1/3 stay exact on
    /// amounts they divide evenly.
    pub fn amount_of(&self, vat_total: Decimal) -> Decimal {
        self.checked_denominator()
            .map(|d| checked::div(checked::mul(vat_total, Decimal::from(self.numerator)), d))
            .unwrap_or(Decimal::ZERO)
    }

    fn checked_denominator(&self) -> Option<Decimal> {
        if self.denominator == 0 {
            tracing::warn!(
                numerator = self.numerator,
                "VAT withholding with zero denominator, using 0"
            );
            return None;
        }
        Some(Decimal::from(self.denominator))
    }
}

impl std::fmt::Display for VatWithholding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Final document totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Σ quantity × unit price.
    pub sub_total: Decimal,
    /// Σ line discounts.
    pub line_discount_total: Decimal,
    /// Document-level discount amount.
    pub document_discount: Decimal,
    /// sub_total − line discounts − document discount. Stopaj base.
    pub discounted_sub_total: Decimal,
    /// Special taxes per kind.
    pub special_tax_totals: Vec<SpecialTaxTotal>,
    /// VAT per rate.
    pub vat_breakdown: Vec<VatBreakdown>,
    /// Σ vat_breakdown.
    pub vat_total: Decimal,
    /// Withholding tax (purchase) or stopaj (sales).
    pub withholding_tax: Decimal,
    /// VAT withholding (sales).
    pub vat_withholding: Decimal,
    /// Final payable amount.
    pub grand_total: Decimal,
    /// Document currency code.
    pub currency_code: String,
    /// Reporting currency code.
    pub reporting_currency_code: String,
    /// Exchange rate applied (1 when currencies match).
    pub exchange_rate: Decimal,
    /// Date of the exchange rate, if given.
    pub exchange_rate_date: Option<NaiveDate>,
    /// grand_total × exchange_rate.
    pub reporting_currency_total: Decimal,
}

impl DocumentTotals {
    /// Σ special tax totals across kinds.
    pub fn special_tax_total(&self) -> Decimal {
        checked::sum(self.special_tax_totals.iter().map(|t| t.amount))
    }

    /// Special tax total for one kind (zero when absent).
    pub fn special_tax(&self, kind: SpecialTaxKind) -> Decimal {
        self.special_tax_totals
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// VAT amount for one rate (zero when no line has that rate).
    pub fn vat_for_rate(&self, rate: Decimal) -> Decimal {
        self.vat_breakdown
            .iter()
            .find(|b| b.rate == rate)
            .map(|b| b.vat_amount)
            .unwrap_or(Decimal::ZERO)
    }
}
