//! Projects press statistics onto the display surface.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::protocol::{Judgements, PressStatistics};

use crate::surface::{DisplaySurface, DomHandles, ElementId, JudgementTargets, HIDDEN_CLASS};

pub const PLOT_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Two decimals with an `ms` suffix. Ties round away from zero, judged on the
/// exact binary value: 100.125 becomes 100.13, while 1.005 is stored just
/// below the tie and stays 1.00.
pub fn format_millis(value: f64) -> String {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return format!("{value:.2}ms");
    };
    let mut rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{rounded}ms")
}

pub fn plot_data_uri(plot_b64: &str) -> String {
    format!("{PLOT_DATA_URI_PREFIX}{plot_b64}")
}

/// Decodes the PNG bytes out of a data URI written by [`render_result`].
pub fn decode_plot_data_uri(source: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = source.strip_prefix(PLOT_DATA_URI_PREFIX).unwrap_or(source);
    STANDARD.decode(payload.trim())
}

pub fn render_result<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    handles: &DomHandles,
    stats: &PressStatistics,
) {
    surface.set_text(&handles.total_presses, &stats.total_presses.to_string());
    surface.set_text(&handles.avg_press_time, &format_millis(stats.avg_press_time));
    surface.set_text(&handles.min_press_time, &format_millis(stats.min_press_time));
    surface.set_text(&handles.max_press_time, &format_millis(stats.max_press_time));
    surface.set_image_source(&handles.plot_image, &plot_data_uri(&stats.plot));

    if let Some(targets) = &handles.judgements {
        render_judgements(surface, targets, &stats.judgements);
    }

    surface.remove_class(&handles.results, HIDDEN_CLASS);
}

fn render_judgements<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    targets: &JudgementTargets,
    judgements: &Judgements,
) {
    let pairs: [(&ElementId, Option<u64>); 7] = [
        (&targets.count_300, judgements.count_300),
        (&targets.count_geki, judgements.count_geki),
        (&targets.count_100, judgements.count_100),
        (&targets.count_katu, judgements.count_katu),
        (&targets.count_50, judgements.count_50),
        (&targets.count_miss, judgements.count_miss),
        (&targets.score, judgements.score),
    ];
    for (target, value) in pairs {
        if let Some(value) = value {
            surface.set_text(target, &value.to_string());
        }
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
