//! Plain-text rendering of the player

use pod_playback::Episode;
use pod_player::{format_duration, ButtonState, NowPlaying, PlayerRenderModel};

const SLIDER_WIDTH: usize = 30;

/// Render the player as a few lines of text
pub fn render_text(model: &PlayerRenderModel) -> String {
    let mut out = String::new();

    out.push_str(&format!("== {} ==\n", model.header));

    match &model.now_playing {
        NowPlaying::Episode {
            title,
            members,
            thumbnail,
        } => {
            out.push_str(&format!("{}\n{}\n[{}]\n", title, members, thumbnail));
        }
        NowPlaying::Empty { message } => {
            out.push_str(&format!("{}\n", message));
        }
    }

    if let Some(reason) = &model.unplayable_reason {
        out.push_str(&format!("!! unplayable: {}\n", reason));
    }

    out.push_str(&format!(
        "{} {} {}\n",
        model.scrubber.elapsed_label,
        slider_bar(model),
        model.scrubber.total_label
    ));

    let buttons: Vec<String> = model
        .controls
        .buttons()
        .iter()
        .map(|(name, state)| {
            let name = if *name == "play" && model.controls.show_pause {
                "pause"
            } else {
                name
            };
            button_label(name, *state)
        })
        .collect();
    out.push_str(&buttons.join(" "));

    out
}

fn slider_bar(model: &PlayerRenderModel) -> String {
    match model.scrubber.slider {
        Some(slider) if slider.max > 0 => {
            let filled = (slider.value as usize * SLIDER_WIDTH) / slider.max as usize;
            let filled = filled.min(SLIDER_WIDTH);
            format!("[{}{}]", "#".repeat(filled), "-".repeat(SLIDER_WIDTH - filled))
        }
        Some(_) => format!("[{}]", "-".repeat(SLIDER_WIDTH)),
        None => format!("[{}]", " ".repeat(SLIDER_WIDTH)),
    }
}

/// `(name)` disabled, `name` enabled, `*name*` active
fn button_label(name: &str, state: ButtonState) -> String {
    match (state.enabled, state.active) {
        (false, _) => format!("({})", name),
        (true, true) => format!("*{}*", name),
        (true, false) => name.to_string(),
    }
}

/// Numbered catalogue listing
pub fn render_catalogue(episodes: &[Episode]) -> String {
    episodes
        .iter()
        .enumerate()
        .map(|(n, episode)| {
            format!(
                "{:>3}. {} - {} ({})",
                n,
                episode.title,
                episode.members,
                format_duration(episode.duration)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_labels() {
        assert_eq!(
            button_label(
                "next",
                ButtonState {
                    enabled: false,
                    active: false
                }
            ),
            "(next)"
        );
        assert_eq!(
            button_label(
                "shuffle",
                ButtonState {
                    enabled: true,
                    active: true
                }
            ),
            "*shuffle*"
        );
    }

    #[test]
    fn catalogue_lists_durations() {
        let text = render_catalogue(&[Episode {
            title: "Pilot".to_string(),
            members: "Ana".to_string(),
            thumbnail: String::new(),
            duration: 65,
            url: String::new(),
        }]);
        assert_eq!(text, "  0. Pilot - Ana (00:01:05)");
    }
}
