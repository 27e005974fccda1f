//! Market overview and listing tables
//!
//! Item names come from the cached item catalog; prices are shown in compact
//! form (`1.5K`, `2.25M`).

use std::io::Write;

use super::{parse_json, CommandError, Context};
use crate::cli::MarketCommand;
use crate::client::{RequestDescriptor, Transport};
use crate::data::item::name_index;
use crate::data::market::{item_label, Listing, MarketOverview, OverviewSort};
use crate::format::format_price;
use crate::render::{print_json, Table};

pub(super) async fn run<T: Transport, W: Write>(
    command: &MarketCommand,
    ctx: &Context<T>,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        MarketCommand::Overview { sort, debug } => {
            let sort = OverviewSort::parse(sort)?;
            let bytes = ctx
                .fetcher
                .fetch(&RequestDescriptor::new("marketPreview"))
                .await?;
            if *debug {
                print_json(out, &bytes)?;
                return Ok(());
            }

            let overview: MarketOverview = parse_json(&bytes, "overview")?;
            let items = ctx.load_items(true).await?;
            let names = name_index(&items);

            let mut table = Table::with_header(["ITEM", "VALUE"]);
            for row in overview.rows(&names, sort) {
                table.row([
                    format!("{} ({})", row.name, row.id),
                    format_price(row.value, false),
                ]);
            }
            table.write_to(out)?;
        }
        MarketCommand::Item { item_id, debug } => {
            let request = RequestDescriptor::new("marketListings").param("itemId", *item_id);
            write_listings(ctx, &request, *debug, out).await?;
        }
        MarketCommand::User { bc_id, debug } => {
            let request = RequestDescriptor::new("userMarketListings").param("id", *bc_id);
            write_listings(ctx, &request, *debug, out).await?;
        }
    }
    Ok(())
}

async fn write_listings<T: Transport, W: Write>(
    ctx: &Context<T>,
    request: &RequestDescriptor,
    debug: bool,
    out: &mut W,
) -> Result<(), CommandError> {
    let bytes = ctx.fetcher.fetch(request).await?;
    if debug {
        print_json(out, &bytes)?;
        return Ok(());
    }

    let listings: Vec<Listing> = parse_json(&bytes, "listings")?;
    let items = ctx.load_items(true).await?;
    let names = name_index(&items);

    let mut table = Table::with_header(["ITEM", "PRICE", "AMOUNT"]);
    for listing in &listings {
        table.row([
            format!("{} ({})", item_label(listing.item_id, &names), listing.item_id),
            format_price(listing.price, false),
            listing.amount.to_string(),
        ]);
    }
    table.write_to(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use std::fs::{self, File};
    use std::time::{Duration, SystemTime};

    #[tokio::test]
    async fn test_overview_sorted_by_price() {
        let (ctx, _dir) = context_with_cache(
            r#"{"lastUpdated": 1, "data": {"item1": 1500, "item2": 25, "item42": 2250000}}"#,
        );
        let mut out = Vec::new();

        run(
            &MarketCommand::Overview {
                sort: "price".to_string(),
                debug: false,
            },
            &ctx,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            rendered(out),
            "ITEM              VALUE\n\
             Kiwi (2)          25\n\
             Seaweed (1)       1.5K\n\
             UNKNOWN(42) (42)  2.25M\n"
        );
        assert_eq!(ctx.fetcher.transport().calls(), 1);
    }

    #[tokio::test]
    async fn test_overview_invalid_sort_sends_nothing() {
        let (ctx, _dir) = context_with_cache("{}");

        let err = run(
            &MarketCommand::Overview {
                sort: "volume".to_string(),
                debug: false,
            },
            &ctx,
            &mut Vec::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid sort option: 'volume' (must be id, name, or price)"
        );
        assert_eq!(ctx.fetcher.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_item_listings_table() {
        let (ctx, _dir) = context_with_cache(
            r#"[{"id": 1, "bcId": 5, "itemId": 1, "price": 1500, "amount": 3},
                {"id": 2, "bcId": 6, "itemId": 2, "price": 25, "amount": 100}]"#,
        );
        let mut out = Vec::new();

        run(
            &MarketCommand::Item {
                item_id: 1,
                debug: false,
            },
            &ctx,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            rendered(out),
            "ITEM         PRICE  AMOUNT\n\
             Seaweed (1)  1.5K   3\n\
             Kiwi (2)     25     100\n"
        );
        let request = ctx.fetcher.transport().last_request().unwrap();
        assert_eq!(request.body["type"], "marketListings");
        assert_eq!(request.body["itemId"], 1);
    }

    #[tokio::test]
    async fn test_user_listings_debug_prints_json() {
        let (ctx, _dir) = context_with_cache(r#"[{"id":1}]"#);
        let mut out = Vec::new();

        run(
            &MarketCommand::User {
                bc_id: 77,
                debug: true,
            },
            &ctx,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(rendered(out), "[\n  {\n    \"id\": 1\n  }\n]\n");
        let request = ctx.fetcher.transport().last_request().unwrap();
        assert_eq!(request.body["type"], "userMarketListings");
        assert_eq!(request.body["id"], 77);
    }

    #[tokio::test]
    async fn test_listings_parse_error() {
        let (ctx, _dir) = context_with_cache(r#"{"error": "nope"}"#);

        let err = run(
            &MarketCommand::Item {
                item_id: 1,
                debug: false,
            },
            &ctx,
            &mut Vec::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CommandError::Parse { what: "listings", .. }));
    }

    #[tokio::test]
    async fn test_stale_catalog_is_refreshed_by_listings() {
        // Parses both as listings and as catalog items
        let body = r#"[{"id": 1, "name": "Seaweed", "itemId": 1, "price": 1500, "amount": 3}]"#;
        let (ctx, _dir) = context_with_cache(body);
        File::options()
            .write(true)
            .open(ctx.cache_path())
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(7200))
            .unwrap();
        let command = MarketCommand::Item {
            item_id: 1,
            debug: false,
        };

        run(&command, &ctx, &mut Vec::new()).await.unwrap();
        assert_eq!(ctx.fetcher.transport().calls(), 2);
        assert_eq!(fs::read_to_string(ctx.cache_path()).unwrap(), body);

        // The rewritten cache is fresh, so only the listings are fetched
        let mut out = Vec::new();
        run(&command, &ctx, &mut out).await.unwrap();
        assert_eq!(ctx.fetcher.transport().calls(), 3);
        assert!(rendered(out).contains("Seaweed (1)  1.5K"));
    }
}
