//! Pure rendering of product records into list nodes.
//!
//! Nothing here touches a document. Attaching a [`ProductList`] somewhere is
//! the job of a [`RenderTarget`](crate::domain::services::RenderTarget).

use super::product::Product;

/// Placeholder replaced by the product id in link templates
pub const PRODUCT_ID_PLACEHOLDER: &str = "product_id";

/// CSS class carried by every product link
pub const LINK_CLASS: &str = "link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLink {
    pub text: String,
    pub href: String,
    pub class: &'static str,
}

/// One `<li>`: the link followed by the price fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductItem {
    pub link: ProductLink,
    pub trailer: String,
}

impl ProductItem {
    /// Visible text of the item, link text included
    pub fn text(&self) -> String {
        format!("{}{}", self.link.text, self.trailer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductList {
    pub items: Vec<ProductItem>,
}

impl ProductList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductItem> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a ProductList {
    type Item = &'a ProductItem;
    type IntoIter = std::slice::Iter<'a, ProductItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Build the list for one page of products.
///
/// Items come out in reverse input order (last product first).
pub fn render_products(products: &[Product], link_template: &str) -> ProductList {
    ProductList {
        items: products
            .iter()
            .rev()
            .map(|product| render_product(product, link_template))
            .collect(),
    }
}

pub fn render_product(product: &Product, link_template: &str) -> ProductItem {
    ProductItem {
        link: ProductLink {
            text: product.name.clone(),
            href: product_href(link_template, product),
            class: LINK_CLASS,
        },
        trailer: price_trailer(product),
    }
}

/// Substitute the first `product_id` occurrence in the template
pub fn product_href(link_template: &str, product: &Product) -> String {
    link_template.replacen(PRODUCT_ID_PLACEHOLDER, product.id.as_str(), 1)
}

/// `" (<amount>)<count>"`, or `" ()<count>"` when there is no price to show.
///
/// The empty-parentheses form for unpriced products is kept as is (`" ()0"`).
pub fn price_trailer(product: &Product) -> String {
    match product.latest_amount() {
        Some(amount) => format!(" ({}){}", format_amount(amount), product.price_count),
        None => format!(" (){}", product.price_count),
    }
}

/// Shortest decimal form, no trailing `.0` for whole amounts (`65`, `9.99`).
///
/// Magnitudes from `1e21` up and below `1e-6` switch to exponent form with an
/// explicit sign (`1e+21`, `1.5e-7`), the way the listing site prints them.
pub fn format_amount(amount: f64) -> String {
    if amount.is_infinite() {
        return if amount.is_sign_positive() { "Infinity" } else { "-Infinity" }.to_string();
    }
    if amount == 0.0 {
        return "0".to_string();
    }
    let magnitude = amount.abs();
    if magnitude >= EXPONENT_FORM_UPPER || magnitude < EXPONENT_FORM_LOWER {
        return exponent_form(amount);
    }
    format!("{amount}")
}

const EXPONENT_FORM_UPPER: f64 = 1e21;
const EXPONENT_FORM_LOWER: f64 = 1e-6;

fn exponent_form(amount: f64) -> String {
    let formatted = format!("{amount:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::LatestPrice;
    use proptest::prelude::*;
    use rstest::rstest;

    fn product(id: u64, name: &str) -> Product {
        Product::new(id, name)
    }

    #[test]
    fn test_empty_products_render_empty_list() {
        let list = render_products(&[], "/store/product_id");
        assert!(list.is_empty());
    }

    #[test]
    fn test_reverse_order() {
        let products = vec![product(1, "A"), product(2, "B"), product(3, "C")];
        let list = render_products(&products, "/p/product_id");
        let names: Vec<&str> = list.iter().map(|item| item.link.text.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_unpriced_product_trailer() {
        let item = render_product(&product(5, "Salt"), "/p/product_id");
        assert!(item.text().ends_with(" ()0"));
        assert_eq!(item.trailer, " ()0");
    }

    #[test]
    fn test_priced_product_trailer() {
        let item = render_product(&product(5, "Salt").with_prices(2, 9.99), "/p/product_id");
        assert!(item.text().ends_with(" (9.99)2"));
        assert_eq!(item.text(), "Salt (9.99)2");
    }

    #[test]
    fn test_zero_count_never_shows_stale_price() {
        let mut p = product(5, "Salt");
        p.latest_price = Some(LatestPrice::new(12.5));
        assert_eq!(price_trailer(&p), " ()0");
    }

    #[test]
    fn test_missing_latest_price_with_count() {
        let mut p = product(5, "Salt");
        p.price_count = 4;
        assert_eq!(price_trailer(&p), " ()4");
    }

    #[test]
    fn test_href_substitution() {
        let item = render_product(&product(42, "Tea"), "/store/product_id");
        assert_eq!(item.link.href, "/store/42");
        assert_eq!(item.link.class, "link");
    }

    #[test]
    fn test_href_replaces_first_occurrence_only() {
        let p = Product::new("abc", "Tea");
        assert_eq!(
            product_href("/product_id/product_id", &p),
            "/abc/product_id"
        );
    }

    #[test]
    fn test_href_without_placeholder_is_unchanged() {
        assert_eq!(product_href("/static", &product(1, "x")), "/static");
    }

    #[rstest]
    #[case(9.99, "9.99")]
    #[case(65.0, "65")]
    #[case(10.5, "10.5")]
    #[case(0.1, "0.1")]
    #[case(1234.0, "1234")]
    #[case(-0.0, "0")]
    #[case(1e20, "100000000000000000000")]
    #[case(1e21, "1e+21")]
    #[case(2.5e22, "2.5e+22")]
    #[case(0.000_001, "0.000001")]
    #[case(1e-7, "1e-7")]
    #[case(-1.5e-7, "-1.5e-7")]
    fn test_format_amount(#[case] amount: f64, #[case] expected: &str) {
        assert_eq!(format_amount(amount), expected);
    }

    proptest! {
        #[test]
        fn prop_length_and_reverse_order(names in proptest::collection::vec("[a-z]{1,8}", 0..40)) {
            let products: Vec<Product> = names
                .iter()
                .enumerate()
                .map(|(i, n)| Product::new(i as u64, n.as_str()))
                .collect();
            let list = render_products(&products, "/p/product_id");

            prop_assert_eq!(list.len(), products.len());
            for (item, source) in list.iter().zip(products.iter().rev()) {
                prop_assert_eq!(&item.link.text, &source.name);
                prop_assert_eq!(&item.link.href, &format!("/p/{}", source.id));
            }
        }
    }
}
