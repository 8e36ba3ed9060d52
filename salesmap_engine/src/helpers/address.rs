use crate::db_types::InvoiceAddress;

/// Build a single free-form lookup string from an invoice address.
///
/// Fields are joined with `", "` in the order street, city, zipcode, state, country, which is
/// the order geocoders parse most reliably. Blank fields are skipped. Returns `None` when every
/// field is blank, which callers treat as "nothing to geocode" rather than an error.
pub fn format_address(address: &InvoiceAddress) -> Option<String> {
    let parts = [&address.street, &address.city, &address.zipcode, &address.state, &address.country]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn address(street: &str, city: &str, zipcode: &str, state: &str, country: &str) -> InvoiceAddress {
        let field = |s: &str| (!s.is_empty()).then(|| s.to_string());
        InvoiceAddress {
            street: field(street),
            city: field(city),
            zipcode: field(zipcode),
            state: field(state),
            country: field(country),
        }
    }

    #[test]
    fn full_address() {
        let addr = address("123 Main St", "Springfield", "00000", "", "Testland");
        assert_eq!(format_address(&addr).unwrap(), "123 Main St, Springfield, 00000, Testland");
    }

    #[test]
    fn field_order_is_fixed() {
        let addr = address("1 Park Ave", "New York", "10001", "NY", "USA");
        assert_eq!(format_address(&addr).unwrap(), "1 Park Ave, New York, 10001, NY, USA");
    }

    #[test]
    fn partial_address_skips_blank_fields() {
        let addr = address("", "Berlin", "", "", "Germany");
        assert_eq!(format_address(&addr).unwrap(), "Berlin, Germany");
    }

    #[test]
    fn whitespace_only_fields_are_blank() {
        let mut addr = address("", "", "", "", "");
        addr.city = Some("  ".to_string());
        assert!(format_address(&addr).is_none());
    }

    #[test]
    fn empty_address_formats_to_none() {
        assert!(format_address(&InvoiceAddress::default()).is_none());
    }
}
