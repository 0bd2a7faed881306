use odata_filter::prelude::*;

#[derive(ODataEntity)]
pub struct Address {
    pub city: String,
}

#[derive(ODataEntity)]
pub struct Person {
    pub name: Option<String>,
    pub address: Option<Box<Address>>,
    #[odata(skip)]
    pub cache: std::collections::HashMap<String, String>,
    pub r#type: String,
}

fn main() {
    let filter = ODataFilterBuilder::<Person>::build(|b, p| {
        b.or([
            b.is_null(p.name()),
            b.eq(p.address().city(), "Berlin"),
            b.eq(p.r#type(), "admin"),
        ])
    })
    .unwrap();

    assert_eq!(filter, "(name eq null or address/city eq 'Berlin' or type eq 'admin')");
}
