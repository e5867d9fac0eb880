// libwalrus/src/protocol/responses/tune.rs

use crate::protocol::Pm3Frame;

/// Number of LF sweep samples carried in the payload.
pub const LF_SAMPLE_COUNT: usize = 256;

/// Antenna tuning measurement. LF fields are only present when the LF band
/// was measured, `hf_voltage` only when HF was.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TuneResult {
    pub lf: bool,
    pub hf: bool,
    /// Volts per LF sweep step
    pub lf_voltages: Option<Vec<f32>>,
    /// Volts at 125 kHz
    pub v125: Option<f32>,
    /// Volts at 134 kHz
    pub v134: Option<f32>,
    /// Resonant frequency in Hz
    pub peak_f: Option<f32>,
    pub peak_v: Option<f32>,
    pub hf_voltage: Option<f32>,
}

impl TuneResult {
    /// Unpack a `MEASURED_ANTENNA_TUNING` frame. Voltages are millivolt
    /// integers on the wire.
    pub fn from_frame(frame: &Pm3Frame, lf: bool, hf: bool) -> Self {
        let [arg0, arg1, arg2] = *frame.args();
        let millis = |v: u64| v as f32 / 1e3;

        let lf_voltages = frame.data()[..LF_SAMPLE_COUNT]
            .iter()
            .map(|&b| millis(u64::from(b) << 8))
            .collect();

        Self {
            lf,
            hf,
            lf_voltages: lf.then_some(lf_voltages),
            v125: lf.then(|| millis(arg0 & 0xFFFF)),
            v134: lf.then(|| millis(arg0 >> 16)),
            peak_f: lf.then(|| 12e6 / ((arg2 & 0xFFFF) + 1) as f32),
            peak_v: lf.then(|| millis(arg2 >> 16)),
            hf_voltage: hf.then(|| millis(arg1 & 0xFFFF)),
        }
    }
}
