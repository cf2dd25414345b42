use clipsplitter::cues::read_timeline;
use clipsplitter::plan_segments;
use clipsplitter::segmentation::select_split_points;
use std::env;

fn main() {
    println!("🔍 SRT Inspector - Split Point Analysis");
    println!("=======================================");

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: srt_inspector <subtitles.srt> [min_duration_secs]");
        println!("Example: srt_inspector tests/testdata/sample_subtitles.srt 60");
        return;
    }
    let file_path = &args[1];
    let min_duration = match args.get(2).map(|raw| raw.parse::<f64>()) {
        None => 60.0,
        Some(Ok(value)) if value > 0.0 => value,
        Some(_) => {
            println!("❌ Invalid minimum duration: {}", args[2]);
            return;
        }
    };

    match inspect(file_path, min_duration) {
        Ok(_) => println!("\n✅ Inspection completed successfully"),
        Err(e) => println!("\n❌ Inspection failed: {}", e),
    }
}

fn inspect(path: &str, min_duration: f64) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = read_timeline(path)?;
    let timeline = &parsed.timeline;

    println!("📄 File: {}", path);
    println!("💬 Cues: {}", timeline.len());
    println!("⏱️  Ends at: {:.3}s", timeline.end_time());

    if !parsed.skipped.is_empty() {
        println!("\n⚠️  Skipped {} stanza(s):", parsed.skipped.len());
        for entry in &parsed.skipped {
            println!("  #{:<4} {}", entry.ordinal, entry.reason);
        }
    }

    let split_points = select_split_points(timeline, min_duration);
    println!(
        "\n📌 Split points (min {:.1}s): {}",
        min_duration,
        split_points.len()
    );
    for point in &split_points {
        println!("  {:>10.3}s", point);
    }

    let intervals = plan_segments(&split_points, Some(timeline.end_time()), true);
    println!("\n✂️  Planned segments:");
    for (i, interval) in intervals.iter().enumerate() {
        let tail = if i >= split_points.len() { " (remainder)" } else { "" };
        println!(
            "  #{:<3} {:>10.3}s -> {:>10.3}s  ({:.3}s){}",
            i + 1,
            interval.start,
            interval.end,
            interval.duration(),
            tail
        );
    }

    Ok(())
}
