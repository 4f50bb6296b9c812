//! Property-based tests for the rematrixer.
//!
//! Every run is checked against a straightforward oracle: output channel `c`
//! equals the original input channel its route resolves to, or silence.

use proptest::prelude::*;
use rematrix_core::{MAX_CHANNELS, Rematrixer, RoutingTable};

/// Planar buffers with 1..=MAX_CHANNELS channels and up to ~2 ticks of frames.
fn planar_buffer() -> impl Strategy<Value = Vec<Vec<f32>>> {
    (1usize..=MAX_CHANNELS, 0usize..2100).prop_flat_map(|(channels, frames)| {
        prop::collection::vec(prop::collection::vec(-1.0f32..=1.0f32, frames), channels)
    })
}

/// Route values spanning mute, valid, stale, and nonsense entries.
fn route_values() -> impl Strategy<Value = [i64; MAX_CHANNELS]> {
    prop::array::uniform8(-3i64..12)
}

/// Expected output computed without any in-place mutation.
fn oracle(input: &[Vec<f32>], table: &RoutingTable) -> Vec<Vec<f32>> {
    let channel_count = input.len();
    (0..channel_count)
        .map(|output| match table.resolve(output, channel_count) {
            Some(source) => input[source].clone(),
            None => vec![0.0; input[output].len()],
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Any routing matches the oracle, including fan-out and swaps.
    #[test]
    fn matches_oracle(input in planar_buffer(), routes in route_values()) {
        let table = RoutingTable::from_routes(routes);
        let frames = input[0].len();
        let expected = oracle(&input, &table);

        let mut rematrixer = Rematrixer::new(input.len()).unwrap();
        let mut buffer = input.clone();
        rematrixer.process(&mut buffer, frames, &table);

        prop_assert_eq!(buffer, expected);
    }

    /// Channel count and frame count never change.
    #[test]
    fn shape_is_preserved(input in planar_buffer(), routes in route_values()) {
        let frames = input[0].len();
        let mut rematrixer = Rematrixer::new(input.len()).unwrap();
        let mut buffer = input.clone();
        rematrixer.process(&mut buffer, frames, &RoutingTable::from_routes(routes));

        prop_assert_eq!(buffer.len(), input.len());
        for region in &buffer {
            prop_assert_eq!(region.len(), frames);
        }
    }

    /// Identity routing leaves the buffer untouched.
    #[test]
    fn identity_is_noop(input in planar_buffer()) {
        let frames = input[0].len();
        let mut rematrixer = Rematrixer::new(input.len()).unwrap();
        let mut buffer = input.clone();
        rematrixer.process(&mut buffer, frames, &RoutingTable::identity());

        prop_assert_eq!(buffer, input);
    }

    /// Muted outputs are all-zero regardless of input.
    #[test]
    fn muted_outputs_are_silent(
        input in planar_buffer(),
        routes in route_values(),
        muted in prop::array::uniform8(any::<bool>()),
    ) {
        let mut values = routes;
        for (value, &mute) in values.iter_mut().zip(muted.iter()) {
            if mute {
                *value = -1;
            }
        }
        let frames = input[0].len();
        let mut rematrixer = Rematrixer::new(input.len()).unwrap();
        let mut buffer = input;
        rematrixer.process(&mut buffer, frames, &RoutingTable::from_routes(values));

        for (output, region) in buffer.iter().enumerate() {
            if muted[output] {
                prop_assert!(region.iter().all(|&s| s == 0.0), "output {} not silent", output);
            }
        }
    }

    /// Chunked processing is sample-identical to a single unchunked pass.
    #[test]
    fn chunking_is_transparent(
        input in planar_buffer(),
        routes in route_values(),
        tick in 1usize..600,
    ) {
        let frames = input[0].len();
        let table = RoutingTable::from_routes(routes);

        let mut chunked = input.clone();
        Rematrixer::with_tick_frames(input.len(), tick)
            .unwrap()
            .process(&mut chunked, frames, &table);

        let mut single = input.clone();
        Rematrixer::with_tick_frames(input.len(), frames.max(1))
            .unwrap()
            .process(&mut single, frames, &table);

        prop_assert_eq!(chunked, single);
    }
}
