use retail_admin::{
    entity::order_details::OrderStatus, models::OrderDetail, services::order_summary::OrderSummary,
};

fn line(product_id: i32, price: i64, quantity: i32, status: OrderStatus) -> OrderDetail {
    OrderDetail {
        product_id,
        product_name: format!("Product {product_id}"),
        price,
        quantity,
        status,
        total: price.saturating_mul(i64::from(quantity)),
    }
}

#[test]
fn detail_rows_aggregate_without_cancelled_lines() {
    let detail = vec![
        line(1, 3500, 4, OrderStatus::Pending),
        line(2, 5000, 2, OrderStatus::Confirm),
        line(3, 15000, 1, OrderStatus::Cancel),
    ];

    let summary = OrderSummary::from_lines(&detail);
    assert_eq!(summary.total_quantity, 6);
    assert_eq!(summary.grand_total, 4 * 3500 + 2 * 5000);
    assert_eq!(summary.item_count, 2);

    // Borrowed and owned lines give the same totals.
    assert_eq!(OrderSummary::from_lines(detail), summary);
}

#[test]
fn huge_values_saturate_instead_of_overflowing() {
    let detail = [
        line(1, i64::MAX, i32::MAX, OrderStatus::Pending),
        line(2, i64::MAX, 1, OrderStatus::Pending),
    ];
    let summary = OrderSummary::from_lines(&detail[..]);
    assert_eq!(summary.grand_total, i64::MAX);
    assert_eq!(summary.total_quantity, i64::from(i32::MAX) + 1);
}

#[test]
fn summary_serializes_with_snake_case_fields() {
    let summary = OrderSummary::from_lines([line(1, 100, 2, OrderStatus::Pending)]);
    let json = serde_json::to_value(summary).expect("json");
    assert_eq!(json["grand_total"], 200);
    assert_eq!(json["total_quantity"], 2);
    assert_eq!(json["item_count"], 1);
}
