//! Built-in articles used by the `sample` command and the rendering tests.

use chrono::{TimeZone, Utc};

use crate::model::ArticleRecord;

/// Returns a small digest with a mix of short and long summaries.
///
/// The last summary is long enough to carry the digest onto a second A4 page with the default
/// layout.
pub fn sample_articles() -> Vec<ArticleRecord> {
    let published = |day, hour| {
        Utc.with_ymd_and_hms(2024, 4, day, hour, 0, 0)
            .single()
            .unwrap_or_default()
    };

    vec![
        ArticleRecord::new(
            "Grid operators trial long-duration storage to smooth evening peaks",
            "1/ Three regional grid operators have started a joint trial of iron-air batteries \
             able to discharge for up to 100 hours. 2/ Early results show evening price spikes \
             falling by a fifth on trial days. 3/ Regulators will publish an assessment in the \
             autumn before deciding on wider procurement.",
        )
        .with_source("Energy Desk")
        .with_url("https://news.example.com/energy/long-duration-storage")
        .with_date(published(2, 7))
        .with_author("Priya Raman"),
        ArticleRecord::new(
            "City council approves car-free weekends along the riverfront",
            "1/ The riverfront boulevard will close to private cars every weekend from June. \
             2/ Local businesses are split, with cafes in favour and delivery firms opposed. \
             3/ A review after six months will decide whether the scheme becomes permanent.",
        )
        .with_source("Metro Bulletin")
        .with_url("https://news.example.com/city/riverfront-weekends")
        .with_date(published(3, 12)),
        ArticleRecord::new(
            "Researchers publish open dataset of annotated coastal erosion imagery",
            &long_summary(),
        )
        .with_source("Science Weekly")
        .with_url("https://news.example.com/science/coastal-erosion-dataset")
        .with_date(published(4, 16))
        .with_author("Tomás Ferreira"),
    ]
}

fn long_summary() -> String {
    let points = [
        "The dataset covers more than forty thousand aerial photographs of shorelines taken over \
         two decades, each annotated with cliff edges, dune lines and vegetation boundaries.",
        "Annotations were produced by a mix of volunteer surveyors and trained geologists, with \
         every image reviewed at least twice before release.",
        "The authors hope the collection will let smaller councils benchmark their own erosion \
         models without commissioning expensive surveys.",
        "Licensing allows commercial reuse provided derived datasets credit the original survey \
         teams and keep the same open terms.",
    ];

    points
        .iter()
        .cycle()
        .take(24)
        .enumerate()
        .map(|(index, point)| format!("{}/ {}", index + 1, point))
        .collect::<Vec<_>>()
        .join(" ")
}
