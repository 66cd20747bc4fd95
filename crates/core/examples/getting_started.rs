use chrono::NaiveDate;
use staymap::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see ring search rounds)
    env_logger::init();

    println!("=== Staymap - Getting Started ===\n");

    let date = NaiveDate::from_ymd_opt(2019, 1, 15).ok_or("bad date")?;
    let open = |price| Calendar::new().with_day(date, CalendarDay::available(price));

    let catalog = Catalog::builder()
        .listings(vec![
            Listing::new(11156, -33.86917, 151.22656)
                .with_name("An Oasis in the City")
                .with_rating(92.0)
                .with_price(65.0)
                .with_calendar(open(None)),
            Listing::new(12351, -33.86515, 151.1919)
                .with_name("Sydney City & Harbour at the door")
                .with_rating(95.0)
                .with_price(98.0)
                .with_calendar(open(Some(120.0))),
            Listing::new(14250, -33.8808, 151.2106)
                .with_name("Manly Harbour House")
                .with_rating(88.0)
                .with_price(470.0),
        ])
        .build()?;
    println!("✓ Indexed {} listings\n", catalog.len());

    // === RANGE SEARCH ===
    println!("1. Available listings in the CBD");
    println!("--------------------------------");

    let cbd = BoundingBox::new(-33.89, 151.18, -33.86, 151.23)?;
    let filter = QueryFilter::on(date).with_max_price(100.0);
    for listing in catalog.search_rectangle(&cbd, &filter)? {
        println!(
            "   {} {:?} at {:?}/night",
            listing.id, listing.name, listing.price
        );
    }
    println!();

    // === AREA STATS ===
    println!("2. Area stats");
    println!("-------------");

    let stats = catalog.stats(&cbd)?;
    println!(
        "   {} listings, average rating {:?}\n",
        stats.listing_count, stats.avg_rating
    );

    // === NEAREST HIGHER-RATED ===
    println!("3. Nearest higher-rated listing");
    println!("-------------------------------");

    let nearest = catalog.nearest_higher(ListingId(14250))?;
    println!(
        "   {:?} is {:.0} m away",
        nearest.listing.name, nearest.distance_meters
    );

    match catalog.nearest_higher(ListingId(12351)) {
        Ok(_) => println!("   unexpected result for the top-rated listing"),
        Err(e) => println!("   12351: {}", e),
    }

    println!("\n=== Done ===");
    Ok(())
}
