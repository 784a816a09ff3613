//! Arithmetic repair of sales figures.

/// Sales amount and unit price after repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesFigures {
    pub sales: Option<i64>,
    pub price: Option<i64>,
}

/// `quantity × |price|`, absent if either operand is absent or on overflow.
pub fn expected_sales(quantity: Option<i64>, price: Option<i64>) -> Option<i64> {
    quantity?.checked_mul(price?.checked_abs()?)
}

/// Repair the sales amount and unit price of one line.
///
/// The amount is recomputed as `quantity × |price|` when it is absent,
/// non-positive, or disagrees with a computable product. A mismatch can only
/// be detected when price and quantity are both present, otherwise a positive
/// amount is kept.
///
/// The price is recomputed from the raw amount as `sales ÷ quantity`
/// (truncating) when it is absent or non-positive; a zero or absent quantity
/// leaves it absent.
pub fn repair_sales_figures(
    sales: Option<i64>,
    quantity: Option<i64>,
    price: Option<i64>,
) -> SalesFigures {
    let expected = expected_sales(quantity, price);
    let sales_invalid = match sales {
        None => true,
        Some(amount) if amount <= 0 => true,
        Some(amount) => expected.is_some_and(|value| value != amount),
    };
    let repaired_sales = if sales_invalid { expected } else { sales };

    let price_invalid = price.is_none_or(|value| value <= 0);
    let repaired_price = if price_invalid {
        match (sales, quantity) {
            (Some(amount), Some(qty)) if qty != 0 => amount.checked_div(qty),
            _ => None,
        }
    } else {
        price
    };

    SalesFigures {
        sales: repaired_sales,
        price: repaired_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_line_is_untouched() {
        let figures = repair_sales_figures(Some(50), Some(2), Some(25));
        assert_eq!(figures.sales, Some(50));
        assert_eq!(figures.price, Some(25));
    }

    #[test]
    fn mismatched_amount_is_recomputed() {
        let figures = repair_sales_figures(Some(40), Some(2), Some(25));
        assert_eq!(figures.sales, Some(50));
    }

    #[test]
    fn negative_price_uses_absolute_value_and_is_rederived() {
        let figures = repair_sales_figures(Some(50), Some(2), Some(-25));
        assert_eq!(figures.sales, Some(50));
        assert_eq!(figures.price, Some(25));
    }

    #[test]
    fn missing_amount_comes_from_price() {
        let figures = repair_sales_figures(None, Some(3), Some(10));
        assert_eq!(figures.sales, Some(30));
        assert_eq!(figures.price, Some(10));
    }

    #[test]
    fn missing_price_comes_from_amount() {
        let figures = repair_sales_figures(Some(35), Some(1), None);
        assert_eq!(figures.sales, Some(35));
        assert_eq!(figures.price, Some(35));
    }

    #[test]
    fn zero_quantity_guards_division() {
        let figures = repair_sales_figures(Some(35), Some(0), Some(0));
        assert_eq!(figures.price, None);
        assert_eq!(figures.sales, Some(0));
    }

    #[test]
    fn price_division_truncates() {
        let figures = repair_sales_figures(Some(10), Some(3), None);
        assert_eq!(figures.price, Some(3));
    }
}
