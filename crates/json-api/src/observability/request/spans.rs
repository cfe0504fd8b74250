//! Route labels for spans and metrics.

use uuid::Uuid;

/// Collapse identifiers in a request path so labels stay low-cardinality.
///
/// `/orders/0190…/payment` becomes `/orders/{uuid}/payment`.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuids_are_collapsed() {
        assert_eq!(
            route_label("/orders/0190f1b2-8c3a-7d4e-9f00-123456789abc/payment"),
            "/orders/{uuid}/payment"
        );
        assert_eq!(route_label("/cart/items"), "/cart/items");
        assert_eq!(route_label("/"), "/");
    }

    #[test]
    fn webhook_gateway_names_are_kept() {
        assert_eq!(route_label("/webhook/paypal"), "/webhook/paypal");
    }
}
