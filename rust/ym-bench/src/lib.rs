//! ym-bench: criterion micro-benchmarks live under `benches/`.
