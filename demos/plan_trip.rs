use chrono::NaiveDate;
use trip_itinerary_rs::{parse_itinerary_with_report, Accommodation, TripPlanner, TripRequest};

const SAMPLE: &str = "Trip Highlights:
- Sunrise over the Bosphorus
- Grand Bazaar treasure hunt

Day 1 – Friday, September 12
Morning: Hagia Sophia – Byzantine and Ottoman history – $25 – Cultural
Afternoon: Grand Bazaar – Haggle for carpets and lamps – $40 – Shopping
Evening: Rooftop Dinner – Meze with a view – $55 – Food

Day 3 – Sunday, September 14
Morning: Princes' Islands – Ferry and bike ride
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::try_init().ok();

    let request = TripRequest::new(
        "Istanbul, Turkey",
        NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
        NaiveDate::from_ymd_opt(2025, 9, 14).unwrap(),
    )
    .with_budget(900.0)
    .with_group_size("2")
    .with_preferences(["History", "Foodie"])
    .with_accommodation(Accommodation::Hotel);

    println!("=== Offline parse of sample text ===\n");
    let (itinerary, report) = parse_itinerary_with_report(SAMPLE, &request);

    println!("{}", itinerary.summary);
    for highlight in &itinerary.highlights {
        println!("  * {}", highlight);
    }
    for day in &itinerary.days {
        println!("\nDay {} ({}) - est. ${}", day.day_number, day.date, day.daily_budget);
        for activity in &day.activities {
            println!(
                "  {:<9} {} [{}] ${}",
                activity.time_slot, activity.name, activity.category, activity.cost
            );
        }
    }
    println!(
        "\nExtracted {} slots, synthesized {}; days missing from text: {:?}",
        report.slots_extracted,
        report.slots_synthesized,
        report.days_missing(request.duration_days())
    );

    // Live generation only when a provider key is configured
    match TripPlanner::from_env() {
        Ok(planner) => {
            println!("\n=== Live itinerary from {} ===\n", planner.provider_name());
            let itinerary = planner.plan(&request).await?;
            println!("{}", serde_json::to_string_pretty(&itinerary)?);
        }
        Err(err) => eprintln!("\nSkipping live generation: {}", err),
    }

    Ok(())
}
