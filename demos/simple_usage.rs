use planscope::core::config::Config;
use planscope::core::engine::{RangeFilter, SearchEngine, SearchRequest};
use planscope::core::error::Result;
use planscope::core::types::SourceDocument;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Planscope Simple Usage ===\n");

    let data_dir = std::env::temp_dir().join("planscope-demo");
    let engine = SearchEngine::open(Config::default().with_data_dir(&data_dir))?;

    let report = engine.build(vec![
        SourceDocument::new("googledrive.csv", &["Plan", "Capacity", "Price Per Month"])
            .with_row(&["Basic", "100 GB", "1.99"])
            .with_row(&["Premium", "2 TB", "9.99"]),
        SourceDocument::new("dropbox.csv", &["Plan", "Capacity", "Price Per Month"])
            .with_row(&["Plus", "2 TB", "11.99"])
            .with_row(&["Essentials", "3 TB", "19.99"])
            .with_row(&["Business", "Unlimited", "24"]),
    ])?;
    println!("Indexed {} documents, {} rows in {} ms\n", report.documents, report.rows, report.took_ms);

    println!("1. Exact search 'plus':");
    for record in engine.execute(&SearchRequest::text("plus")).data {
        println!("   {} -> {:?}", record.id, record.fields);
    }

    println!("\n2. Autocomplete 'p':");
    println!("   {:?}", engine.prefix_search("p"));

    println!("\n3. Misspelled 'premum':");
    let response = engine.execute(&SearchRequest::text("premum"));
    if let Some(correction) = response.spell_check {
        println!("   Did you mean '{}'? (distance {})", correction.word, correction.distance);
    }

    println!("\n4. Capacity between 1 TB and 2.5 TB:");
    let request = SearchRequest::default().with_capacity(RangeFilter::between(1024.0, 2560.0));
    println!("   {}", engine.execute(&request).to_json()?);

    println!("\n5. Storage sizes: {:?}", engine.storage_sizes());

    if let Some(layout) = engine.layout() {
        println!("\n6. Top queries (history in {}):", layout.history_path().display());
    }
    for (query, count) in engine.top_queries(5) {
        println!("   {:<12} {}", query, count);
    }

    println!("\n7. Stats:");
    println!("   {}", serde_json::to_string_pretty(&engine.stats())?);

    engine.sync()?;
    Ok(())
}
