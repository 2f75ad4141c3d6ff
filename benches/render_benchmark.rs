//! Rendering cost for a full listing page (100 products, the API page size)

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use store_pager_lib::domain::{Product, render_products};
use store_pager_lib::infrastructure::list_to_html;

const PAGE_SIZE: u64 = 100;

fn listing_page() -> Vec<Product> {
    (0..PAGE_SIZE)
        .map(|i| {
            let product = Product::new(i, format!("Product {i}"));
            if i % 3 == 0 {
                product
            } else {
                #[allow(clippy::cast_precision_loss)]
                let amount = 10.0 + i as f64 * 0.25;
                product.with_prices(u32::try_from(i % 7 + 1).unwrap_or(1), amount)
            }
        })
        .collect()
}

fn render_benchmark(c: &mut Criterion) {
    let products = listing_page();

    c.bench_function("render_products", |b| {
        b.iter(|| render_products(black_box(&products), black_box("/stores/s1/products/product_id")));
    });

    c.bench_function("render_products_to_html", |b| {
        b.iter(|| {
            let list = render_products(black_box(&products), "/stores/s1/products/product_id");
            list_to_html(&list)
        });
    });
}

criterion_group!(benches, render_benchmark);
criterion_main!(benches);
