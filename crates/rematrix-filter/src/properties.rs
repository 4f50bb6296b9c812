//! Settings defaults and the UI description of the filter's properties.
//!
//! The host renders each [`RouteProperty`] as a drop-down list. Labels are
//! localization keys (`out.ch.0`, `in.ch.1`, `mute`) that the host looks up
//! in its own string tables.

use rematrix_config::{MAX_CHANNELS, Route, Settings, apply_defaults, route_key};

use crate::host::AudioHost;

/// Localization key for the "muted" choice.
pub const MUTE_LABEL: &str = "mute";

/// Localization key for the shared tooltip text.
pub const TOOLTIP_KEY: &str = "tooltip";

/// Installs the default route (`route {i} = i`) for every output.
///
/// User values are never overwritten.
pub fn defaults(settings: &mut Settings) {
    apply_defaults(settings);
}

/// One selectable value in a route list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChoice {
    /// Localization key shown to the user.
    pub label: String,
    /// Route value stored in settings when chosen.
    pub value: i64,
}

/// Drop-down list selecting the source of one output channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteProperty {
    /// Settings key (`route {i}`).
    pub key: String,
    /// Localization key for the list's label (`out.ch.{i}`).
    pub label: String,
    /// Localization key for the tooltip.
    pub tooltip: &'static str,
    /// `mute` first, then one entry per input channel.
    pub choices: Vec<RouteChoice>,
}

impl RouteProperty {
    /// Output channel this property controls.
    pub fn output(&self) -> Option<usize> {
        rematrix_config::parse_route_key(&self.key)
    }

    /// The choice matching a stored route value, if it is still offered.
    pub fn choice_for(&self, value: i64) -> Option<&RouteChoice> {
        self.choices.iter().find(|choice| choice.value == value)
    }
}

/// Describes one route property per output channel of the host's current
/// layout.
///
/// The channel count is queried on every call, so the lists follow layout
/// changes the next time the host asks.
pub fn properties(host: &dyn AudioHost) -> Vec<RouteProperty> {
    let channels = host.output_channels().min(MAX_CHANNELS);
    (0..channels)
        .map(|output| RouteProperty {
            key: route_key(output),
            label: format!("out.ch.{output}"),
            tooltip: TOOLTIP_KEY,
            choices: route_choices(channels),
        })
        .collect()
}

/// Choices for a route list under `channels` input channels.
pub fn route_choices(channels: usize) -> Vec<RouteChoice> {
    let channels = channels.min(MAX_CHANNELS);
    let mut choices = Vec::with_capacity(channels + 1);
    choices.push(RouteChoice {
        label: MUTE_LABEL.to_string(),
        value: Route::MUTE.value(),
    });
    for input in 0..channels {
        choices.push(RouteChoice {
            label: format!("in.ch.{input}"),
            value: input as i64,
        });
    }
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FixedHost;

    #[test]
    fn defaults_do_not_override_user_values() {
        let mut settings = Settings::new();
        settings.set_int(route_key(1), -1);
        defaults(&mut settings);
        assert_eq!(settings.get_int(&route_key(0)), Some(0));
        assert_eq!(settings.get_int(&route_key(1)), Some(-1));
        assert_eq!(settings.default_value(&route_key(1)).and_then(|v| v.as_int()), Some(1));
    }

    #[test]
    fn stereo_properties() {
        let props = properties(&FixedHost::new(2));
        assert_eq!(props.len(), 2);

        let first = &props[0];
        assert_eq!(first.key, "route 0");
        assert_eq!(first.label, "out.ch.0");
        assert_eq!(first.tooltip, "tooltip");
        assert_eq!(first.output(), Some(0));

        let labels: Vec<&str> = first.choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["mute", "in.ch.0", "in.ch.1"]);
        let values: Vec<i64> = first.choices.iter().map(|c| c.value).collect();
        assert_eq!(values, [-1, 0, 1]);
    }

    #[test]
    fn oversized_layout_is_capped() {
        let props = properties(&FixedHost::new(12));
        assert_eq!(props.len(), MAX_CHANNELS);
        assert_eq!(props[0].choices.len(), MAX_CHANNELS + 1);
    }

    #[test]
    fn choice_for_stale_route() {
        let props = properties(&FixedHost::new(2));
        assert_eq!(props[1].choice_for(-1).map(|c| c.label.as_str()), Some("mute"));
        assert!(props[1].choice_for(5).is_none());
    }
}
