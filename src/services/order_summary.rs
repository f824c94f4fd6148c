use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{entity::order_details::OrderStatus, models::OrderDetail};

/// Quantity, unit price and status of an order line.
pub trait LineItem {
    fn quantity(&self) -> i32;
    fn unit_price(&self) -> i64;
    fn status(&self) -> OrderStatus;
}

impl LineItem for OrderDetail {
    fn quantity(&self) -> i32 {
        self.quantity
    }

    fn unit_price(&self) -> i64 {
        self.price
    }

    fn status(&self) -> OrderStatus {
        self.status
    }
}

impl<T: LineItem> LineItem for &T {
    fn quantity(&self) -> i32 {
        (*self).quantity()
    }

    fn unit_price(&self) -> i64 {
        (*self).unit_price()
    }

    fn status(&self) -> OrderStatus {
        (*self).status()
    }
}

/// Totals over the lines of an order that are not cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderSummary {
    pub total_quantity: i64,
    pub grand_total: i64,
    pub item_count: usize,
}

impl OrderSummary {
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: LineItem,
    {
        lines
            .into_iter()
            .filter(|line| line.status() != OrderStatus::Cancel)
            .fold(OrderSummary::default(), |acc, line| {
                let quantity = i64::from(line.quantity());
                OrderSummary {
                    total_quantity: acc.total_quantity.saturating_add(quantity),
                    grand_total: acc
                        .grand_total
                        .saturating_add(line.unit_price().saturating_mul(quantity)),
                    item_count: acc.item_count + 1,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line(i32, i64, OrderStatus);

    impl LineItem for Line {
        fn quantity(&self) -> i32 {
            self.0
        }
        fn unit_price(&self) -> i64 {
            self.1
        }
        fn status(&self) -> OrderStatus {
            self.2
        }
    }

    #[test]
    fn cancelled_lines_are_excluded() {
        let lines = [
            Line(2, 1500, OrderStatus::Pending),
            Line(1, 9000, OrderStatus::Cancel),
            Line(3, 200, OrderStatus::Confirm),
        ];
        let summary = OrderSummary::from_lines(&lines);
        assert_eq!(summary.total_quantity, 5);
        assert_eq!(summary.grand_total, 2 * 1500 + 3 * 200);
        assert_eq!(summary.item_count, 2);
    }

    #[test]
    fn empty_order_sums_to_zero() {
        let summary = OrderSummary::from_lines(Vec::<Line>::new());
        assert_eq!(summary, OrderSummary::default());
    }

    #[test]
    fn all_cancelled_sums_to_zero() {
        let lines = vec![Line(4, 10, OrderStatus::Cancel)];
        assert_eq!(OrderSummary::from_lines(lines), OrderSummary::default());
    }
}
