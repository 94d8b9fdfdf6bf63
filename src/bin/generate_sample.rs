//! Writes a synthetic two-channel EMG recording to `data/sample_emg.csv`:
//! burst-modulated gaussian noise (muscle activity) plus a 50 Hz mains
//! component, with a nanosecond-timestamp first column.

use std::f64::consts::PI;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// Smooth on/off contraction envelope: bursts around 2–3 s and 6–8 s.
fn burst_envelope(t: f64) -> f64 {
    let bursts = [(2.5, 0.5), (7.0, 1.0)];
    bursts
        .iter()
        .map(|&(center, width): &(f64, f64)| (-(t - center).powi(2) / (2.0 * width * width)).exp())
        .sum()
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let fs = 200.0;
    let seconds = 10.0;
    let n = (fs * seconds) as usize;

    let output_path = "data/sample_emg.csv";
    std::fs::create_dir_all("data").expect("Failed to create data directory");
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["timestamp_ns", "emg_flexor", "emg_extensor"])
        .expect("Failed to write header");

    for i in 0..n {
        let t = i as f64 / fs;
        let timestamp_ns = (t * 1e9) as u64;

        let mains = 0.05 * (2.0 * PI * 50.0 * t).sin();
        let flexor = burst_envelope(t) * rng.gauss(0.0, 0.4) + mains;
        // Antagonist bursts offset by half the recording.
        let extensor =
            burst_envelope((t + seconds / 2.0) % seconds) * rng.gauss(0.0, 0.3) + mains;

        writer
            .write_record([
                timestamp_ns.to_string(),
                format!("{flexor:.6}"),
                format!("{extensor:.6}"),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n} samples at {fs} Hz to {output_path}");
}
