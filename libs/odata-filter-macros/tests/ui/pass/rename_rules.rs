use odata_filter::prelude::*;

#[derive(ODataEntity)]
#[odata(rename_all = "PascalCase")]
struct Customer {
    display_name: String,
    #[odata(name = "EMail")]
    email: String,
}

#[derive(ODataEntity)]
#[odata(rename_all = "camelCase")]
struct Invoice {
    customer: Customer,
    total_amount: f64,
    line_items: Vec<LineItem>,
}

#[derive(ODataEntity)]
struct LineItem {
    unit_price: f64,
}

fn main() {
    let filter = ODataFilterBuilder::<Invoice>::build(|b, p| {
        b.and([
            b.eq(p.customer().display_name(), "ACME"),
            b.ne(p.customer().email(), "x@y"),
            b.gt(p.total_amount(), 10),
            b.collection(p.line_items(), "l").any(|l, item| l.lt(item.unit_price(), 1)),
        ])
    })
    .unwrap();

    assert_eq!(
        filter,
        "(customer/DisplayName eq 'ACME' and customer/EMail ne 'x@y' and totalAmount gt 10 and lineItems/any(l: l/unit_price lt 1))"
    );
}
