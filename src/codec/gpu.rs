//! GPU adapter probe (feature "gpu"), mirroring the shape of the teacher's
//! own optional `ocl`-gated `gpu` module with `wgpu` standing in for `ocl`:
//! presence of a usable adapter is used only to pick a higher
//! [`super::Quality`] tier for BC7 compression (spec §4.4 step 4, "GPU vs CPU
//! block compression" — see spec §9's discussion of this as an
//! implementation detail rather than an externally observable behavior).

use super::Quality;

pub struct GpuContext {
    adapter_name: String,
}

impl GpuContext {
    /// Try to acquire any wgpu adapter. Returns `None` if no backend can
    /// produce one (headless CI boxes, sandboxed builds, etc.) — this is not
    /// treated as an error anywhere upstream, only as "fall back to Fast".
    pub fn try_new() -> Option<GpuContext> {
        let instance = wgpu::Instance::default();
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))?;
        let info = adapter.get_info();
        Some(GpuContext {
            adapter_name: info.name,
        })
    }

    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }
}

/// Pick the compression quality tier for this run (spec §4.4 step 4).
pub fn select_quality(gpu: Option<&GpuContext>) -> Quality {
    match gpu {
        Some(_) => Quality::High,
        None => Quality::Fast,
    }
}
