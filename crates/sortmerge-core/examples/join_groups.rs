//! Join two tables whose keys repeat by grouping each side first
//!
//! Run with `cargo run -p sortmerge-core --example join_groups`.

use sortmerge_core::logging_facility::{init, Profile};
use sortmerge_core::{merge_join, order, JoinedPair, Result};

#[derive(Debug)]
struct Order {
    customer: u32,
    item: &'static str,
}

#[derive(Debug)]
struct Visit {
    customer: u32,
    page: &'static str,
}

fn main() -> Result<()> {
    init(Profile::Development);

    let orders = order(
        vec![
            Order { customer: 2, item: "lamp" },
            Order { customer: 1, item: "desk" },
            Order { customer: 2, item: "rug" },
            Order { customer: 4, item: "chair" },
        ],
        |o: &Order| o.customer,
    );
    let visits = order(
        vec![
            Visit { customer: 1, page: "/home" },
            Visit { customer: 3, page: "/sale" },
            Visit { customer: 2, page: "/lamps" },
            Visit { customer: 3, page: "/cart" },
        ],
        |v: &Visit| v.customer,
    );

    // group keys strictly increase, so each side is valid join input
    let order_groups = orders.groups().checked().collect::<Result<Vec<_>>>()?;
    let visit_groups = visits.groups().checked().collect::<Result<Vec<_>>>()?;

    for pair in merge_join(order_groups, |g| *g.key(), visit_groups, |g| *g.key()) {
        match pair {
            JoinedPair::Both(os, vs) => {
                let items: Vec<_> = os.iter().map(|o| o.item).collect();
                let pages: Vec<_> = vs.iter().map(|v| v.page).collect();
                println!(
                    "customer {}: bought {:?} after visiting {:?}",
                    os.key(),
                    items,
                    pages
                );
            }
            JoinedPair::Left(os) => {
                println!("customer {}: {} orders, no visits", os.key(), os.len())
            }
            JoinedPair::Right(vs) => {
                println!("customer {}: {} visits, no orders", vs.key(), vs.len())
            }
        }
    }
    Ok(())
}
