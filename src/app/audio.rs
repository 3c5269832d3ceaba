//! Synthesized sound cues.
//!
//! Two fire-and-forget cues built on the Web Audio API: a short ascending
//! "pop" for confirmations and a 3.5 s accelerating drumroll ending in a
//! high-passed crash. Audio is best effort everywhere: construction or
//! scheduling failures are swallowed and the calling transition proceeds
//! without sound.

use web_sys::{AudioContext, BiquadFilterType, OscillatorType};

use super::rng::RandomSource;

const DRUM_TOTAL_S: f64 = 3.5;
const HIT_LEN_S: f64 = 0.08;
const CRASH_LEN_S: f64 = 0.6;

/// Ascending confirmation pop: 800 Hz to 1200 Hz over 0.1 s.
pub fn play_pop() {
    let _ = try_play_pop();
}

fn try_play_pop() -> Option<()> {
    let ctx = AudioContext::new().ok()?;
    let now = ctx.current_time();
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;
    osc.set_type(OscillatorType::Sine);
    osc.frequency().set_value_at_time(800.0, now).ok()?;
    osc.frequency()
        .exponential_ramp_to_value_at_time(1200.0, now + 0.1)
        .ok()?;
    gain.gain().set_value_at_time(0.15, now).ok()?;
    gain.gain()
        .exponential_ramp_to_value_at_time(0.001, now + 0.3)
        .ok()?;
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;
    osc.start().ok()?;
    osc.stop_with_when(now + 0.3).ok()?;
    Some(())
}

/// Accelerating snare hits ending in a filtered noise crash. Loosely matches
/// the sequencer's drumroll phase timings; sample-exact sync is not needed.
pub fn play_drumroll(rng: &mut impl RandomSource) {
    let _ = try_play_drumroll(rng);
}

fn try_play_drumroll(rng: &mut impl RandomSource) -> Option<()> {
    let ctx = AudioContext::new().ok()?;
    let start = ctx.current_time();

    for (hit_t, vol) in hit_schedule() {
        let buffer = noise_buffer(&ctx, HIT_LEN_S, 3.0, rng)?;
        let source = ctx.create_buffer_source().ok()?;
        source.set_buffer(Some(&buffer));
        let gain = ctx.create_gain().ok()?;
        gain.gain().set_value_at_time(vol, start + hit_t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, start + hit_t + 0.07)
            .ok()?;
        source.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        source.start_with_when(start + hit_t).ok()?;
    }

    // Final crash: longer noise tail through a high-pass.
    let crash_at = start + DRUM_TOTAL_S - 0.3;
    let buffer = noise_buffer(&ctx, CRASH_LEN_S, 1.5, rng)?;
    let source = ctx.create_buffer_source().ok()?;
    source.set_buffer(Some(&buffer));
    let filter = ctx.create_biquad_filter().ok()?;
    filter.set_type(BiquadFilterType::Highpass);
    filter.frequency().set_value(3000.0);
    let gain = ctx.create_gain().ok()?;
    gain.gain().set_value_at_time(0.55, crash_at).ok()?;
    gain.gain()
        .exponential_ramp_to_value_at_time(0.001, start + DRUM_TOTAL_S + 0.3)
        .ok()?;
    source.connect_with_audio_node(&filter).ok()?;
    filter.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;
    source.start_with_when(crash_at).ok()?;
    Some(())
}

/// Hit offsets accelerate: 0.22 s spacing shrinking by x0.88 down to a
/// 0.04 s floor, with volume swelling toward the end.
fn hit_schedule() -> Vec<(f64, f32)> {
    let mut hits = Vec::new();
    let mut t = 0.0;
    let mut interval = 0.22;
    while t < DRUM_TOTAL_S - 0.3 {
        let vol = 0.18 + (t / DRUM_TOTAL_S * 0.5).min(0.35);
        hits.push((t, vol as f32));
        t += interval;
        interval = (interval * 0.88).max(0.04);
    }
    hits
}

/// White noise with a power-curve decay envelope baked into the samples.
fn noise_buffer(
    ctx: &AudioContext,
    len_s: f64,
    decay_pow: f64,
    rng: &mut impl RandomSource,
) -> Option<web_sys::AudioBuffer> {
    let sample_rate = ctx.sample_rate();
    let len = (sample_rate as f64 * len_s) as u32;
    let buffer = ctx.create_buffer(1, len, sample_rate).ok()?;
    let mut data = vec![0.0f32; len as usize];
    for (i, sample) in data.iter_mut().enumerate() {
        let env = (1.0 - i as f64 / len as f64).powf(decay_pow);
        *sample = (rng.symmetric(1.0) * env) as f32;
    }
    buffer.copy_to_channel(&mut data, 0).ok()?;
    Some(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_schedule_accelerates_toward_the_crash() {
        let hits = hit_schedule();
        assert!(hits.len() > 10, "enough hits to read as a roll");
        assert_eq!(hits[0].0, 0.0);
        let mut prev_gap = f64::MAX;
        for pair in hits.windows(2) {
            let gap = pair[1].0 - pair[0].0;
            assert!(gap <= prev_gap + 1e-9, "gaps never widen");
            assert!(gap >= 0.04 - 1e-9, "gap floor holds");
            prev_gap = gap;
        }
        let last = hits.last().unwrap();
        assert!(last.0 < DRUM_TOTAL_S - 0.3);
        assert!(last.1 > hits[0].1, "volume swells");
        assert!(f64::from(last.1) <= 0.18 + 0.35 + 1e-6);
    }
}
