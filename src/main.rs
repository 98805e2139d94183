use anyhow::{Context, Result};
use rand::Rng;
use serde::Serialize;
use tsplit::config::ConfigManager;
use tsplit::{SeriesEntry, SplitPoint, TimeIndex};

const SERIES_COUNT: usize = 5;

#[derive(Serialize)]
struct WindowSpan {
    item: usize,
    window: usize,
    input_start: String,
    input_len: usize,
    label_start: String,
    label_len: usize,
}

#[derive(Serialize)]
struct Summary {
    split_point: String,
    training_lengths: Vec<usize>,
    windows_generated: usize,
    windows_dropped: usize,
    windows: Vec<WindowSpan>,
}

/// Random-walk series whose index kind matches the configured split point.
fn synthetic_dataset(split_point: &SplitPoint) -> Vec<SeriesEntry> {
    let mut rng = rand::thread_rng();
    (0..SERIES_COUNT)
        .map(|item| {
            let len: usize = rng.gen_range(72..=168);
            let mut level: f64 = 100.0;
            let target = (0..len)
                .map(|_| {
                    level += rng.gen_range(-1.0..1.0);
                    level
                })
                .collect();

            let lead = item as i64 * 12;
            let start = match split_point {
                SplitPoint::Offset(_) => TimeIndex::Offset(lead),
                SplitPoint::Date(date) => TimeIndex::Period(date.advance(-96 + lead)),
            };
            SeriesEntry::new(start, target).with_item_id(format!("series_{}", item))
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if let Some(path) = std::env::args().nth(1) {
        manager
            .load_from_file(&path)
            .with_context(|| format!("loading config {}", path))?;
    }
    let config = manager.get();

    let split_point = config.split.to_split_point()?;
    let dataset = synthetic_dataset(&split_point);

    let (training, template) = split_point
        .split(&dataset)
        .context("splitting synthetic dataset")?;
    let test_data = template
        .generate_with(config.windows.to_params())
        .context("generating test windows")?;

    log::info!(
        "{} training series, {} test windows ({} dropped)",
        training.len(),
        test_data.len(),
        test_data.dropped()
    );

    let summary = Summary {
        split_point: format!("{:?}", split_point),
        training_lengths: training.iter().map(|entry| entry.len()).collect(),
        windows_generated: test_data.len(),
        windows_dropped: test_data.dropped(),
        windows: test_data
            .iter()
            .map(|instance| WindowSpan {
                item: instance.item,
                window: instance.window,
                input_start: instance.input.start().to_string(),
                input_len: instance.input.len(),
                label_start: instance.label.start().to_string(),
                label_len: instance.label.len(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
