//! VAT withholding (KDV tevkifatı) codes.
//!
//! Partial withholding is always expressed in tenths of the VAT amount. The
//! table below maps the common partial-withholding transaction codes to
//! their ratio so the sales form can offer a closed list instead of free
//! numerator/denominator entry.

use super::types::VatWithholding;

/// Denominator used by every partial VAT withholding ratio.
pub const WITHHOLDING_DENOMINATOR: u32 = 10;

/// A VAT withholding code with its description and ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithholdingCode {
    pub code: u16,
    pub description: &'static str,
    pub numerator: u32,
}

impl WithholdingCode {
    /// The ratio as a [`VatWithholding`].
    pub fn ratio(&self) -> VatWithholding {
        VatWithholding::new(self.numerator, WITHHOLDING_DENOMINATOR)
    }
}

/// Look up a withholding code.
pub fn withholding_code(code: u16) -> Option<&'static WithholdingCode> {
    WITHHOLDING_CODES
        .binary_search_by_key(&code, |c| c.code)
        .ok()
        .map(|i| &WITHHOLDING_CODES[i])
}

/// Ratios that may appear on an invoice: 1/10 to 10/10.
pub fn is_allowed_ratio(w: &VatWithholding) -> bool {
    w.denominator == WITHHOLDING_DENOMINATOR && (1..=WITHHOLDING_DENOMINATOR).contains(&w.numerator)
}

/// All known codes, sorted by code.
pub fn all_codes() -> &'static [WithholdingCode] {
    WITHHOLDING_CODES
}

macro_rules! code {
    ($code:expr, $num:expr, $desc:expr) => {
        WithholdingCode {
            code: $code,
            description: $desc,
            numerator: $num,
        }
    };
}

static WITHHOLDING_CODES: &[WithholdingCode] = &[
    code!(601, 4, "Yapım işleri ile bu işlerle birlikte ifa edilen mühendislik-mimarlık ve etüt-proje hizmetleri"),
    code!(602, 9, "Etüt, plan-proje, danışmanlık, denetim ve benzeri hizmetler"),
    code!(603, 7, "Makine, teçhizat, demirbaş ve taşıtlara ait tadil, bakım ve onarım hizmetleri"),
    code!(604, 5, "Yemek servis hizmeti"),
    code!(605, 5, "Organizasyon hizmeti"),
    code!(606, 9, "İşgücü temin hizmetleri"),
    code!(607, 9, "Özel güvenlik hizmeti"),
    code!(608, 9, "Yapı denetim hizmetleri"),
    code!(609, 7, "Fason olarak yaptırılan tekstil ve konfeksiyon işleri"),
    code!(610, 9, "Turistik mağazalara verilen müşteri bulma / götürme hizmetleri"),
    code!(611, 9, "Spor kulüplerinin yayın, reklam ve isim hakkı gelirlerine konu işlemleri"),
    code!(612, 9, "Temizlik hizmeti"),
    code!(613, 9, "Çevre ve bahçe bakım hizmetleri"),
    code!(614, 5, "Servis taşımacılığı hizmeti"),
    code!(615, 7, "Her türlü baskı ve basım hizmetleri"),
    code!(616, 5, "Diğer hizmetler"),
    code!(617, 7, "Hurda metalden elde edilen külçe teslimleri"),
    code!(618, 7, "Hurda metalden elde edilenler dışındaki bakır, çinko ve alüminyum külçe teslimleri"),
    code!(619, 7, "Bakır, çinko ve alüminyum ürünlerinin teslimi"),
    code!(620, 2, "İstisnadan vazgeçenlerin hurda ve atık teslimi"),
    code!(621, 9, "Metal, plastik, lastik, kauçuk, kâğıt ve cam hurda ve atıklardan elde edilen hammadde teslimi"),
    code!(622, 9, "Pamuk, tiftik, yün ve yapağı ile ham post ve deri teslimleri"),
    code!(623, 5, "Ağaç ve orman ürünleri teslimi"),
    code!(624, 2, "Yük taşımacılığı hizmeti"),
    code!(625, 3, "Ticari reklam hizmetleri"),
    code!(626, 2, "Diğer teslimler"),
    code!(627, 5, "Demir-çelik ürünlerinin teslimi"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn lookup_known_code() {
        let c = withholding_code(612).unwrap();
        assert_eq!(c.numerator, 9);
        assert_eq!(c.ratio(), VatWithholding::new(9, 10));
        assert_eq!(c.ratio().amount_of(dec!(100)), dec!(90));
    }

    #[test]
    fn unknown_code() {
        assert!(withholding_code(600).is_none());
        assert!(withholding_code(999).is_none());
    }

    #[test]
    fn every_code_has_an_allowed_ratio() {
        for c in all_codes() {
            assert!(is_allowed_ratio(&c.ratio()), "code {} has ratio {}", c.code, c.ratio());
        }
    }

    #[test]
    fn allowed_ratios() {
        assert!(is_allowed_ratio(&VatWithholding::new(10, 10)));
        assert!(!is_allowed_ratio(&VatWithholding::new(0, 10)));
        assert!(!is_allowed_ratio(&VatWithholding::new(1, 3)));
        assert!(!is_allowed_ratio(&VatWithholding::new(9, 0)));
    }

    #[test]
    fn table_is_sorted() {
        for window in WITHHOLDING_CODES.windows(2) {
            assert!(window[0].code < window[1].code);
        }
    }
}
