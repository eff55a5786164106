//! Plain-text rendering of a stored bundle.

use std::fmt::Write;

use watchstats_core::StatsBundle;

const TOP_ROWS: usize = 5;

pub(crate) fn render_bundle(bundle: &StatsBundle) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_bundle(&mut out, bundle);
    out
}

fn write_bundle(out: &mut String, bundle: &StatsBundle) -> std::fmt::Result {
    let summary = &bundle.summary;
    writeln!(out, "Watch history")?;
    writeln!(out, "  videos watched   {}", summary.total_videos)?;
    writeln!(out, "  channels         {}", summary.unique_channels)?;
    writeln!(
        out,
        "  period           {} to {} ({} days)",
        summary.oldest_date.format("%Y-%m-%d"),
        summary.newest_date.format("%Y-%m-%d"),
        summary.days_difference
    )?;
    if let Some(top) = bundle.top_source() {
        writeln!(out, "  top channel      {} ({})", top.name, top.count)?;
    }

    if let Some(advanced) = &bundle.advanced_stats {
        writeln!(out, "  daily average    {:.1}", advanced.daily_average)?;
        writeln!(
            out,
            "  streaks          longest {}, current {}",
            advanced.longest_streak, advanced.current_streak
        )?;
        writeln!(
            out,
            "  favorite day     {} ({}%)",
            advanced.favorite_day, advanced.favorite_day_percentage
        )?;
        writeln!(out, "  peak hour        {:02}:00", advanced.peak_hour)?;
        let p = &advanced.personality;
        writeln!(
            out,
            "  personality      {} / {} / {}",
            p.time.title(),
            p.intensity.title(),
            p.loyalty.title()
        )?;
        writeln!(
            out,
            "  achievements     {} of {} unlocked",
            bundle.unlocked_achievements(),
            advanced.achievements.len()
        )?;
        if let Some(first) = &advanced.first_video {
            match first.date {
                Some(date) => writeln!(
                    out,
                    "  first video      {} ({})",
                    first.title,
                    date.format("%Y-%m-%d")
                )?,
                None => writeln!(out, "  first video      {}", first.title)?,
            }
        }
    }

    if !bundle.top_items.is_empty() {
        writeln!(out, "Top videos")?;
        for (rank, item) in bundle.top_items.iter().take(TOP_ROWS).enumerate() {
            let channel = item.channel.as_deref().unwrap_or("unknown channel");
            writeln!(
                out,
                "  {:>2}. {} [{}] x{}",
                rank + 1,
                item.title,
                channel,
                item.count
            )?;
        }
    }
    Ok(())
}
