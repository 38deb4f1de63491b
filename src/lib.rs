//! # NoCSim - Result analyzer for network-on-chip simulation runs
//!
//! This library turns the text logs written by independent NoC simulator
//! runs into per-run records, derives throughput and efficiency, compares
//! routing algorithms and writes the resulting reports.
//!
//! ## Architecture
//!
//! - `analysis`: extraction, derived metrics, aggregation and report rendering
//! - `config` / `config_loader`: YAML configuration and CLI overrides
//! - `utils`: input discovery
//! - `orchestrator`: one full run, from input directory to report files
//!
//! Data flows one way: log files → records → grouped statistics → reports.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nocsim::{config_loader, orchestrator};
//!
//! let config = config_loader::load_or_default(None)?;
//! let run = orchestrator::run_analysis(&config)?;
//! orchestrator::write_outputs(&run, &config)?;
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Input Format
//!
//! Files are named `test_<algorithm>[_<W>x<H>]_<rate>pct_<suffix>.txt` and
//! contain labelled header lines (Portuguese or English) followed by
//! per-node and network summary lines:
//!
//! ```text
//! Tamanho da malha: 4x4
//! Algoritmo de roteamento: XY
//! Taxa de injeção de pacotes: 30%
//! Tempo de simulação: 1000 ciclos
//! Node 0: Sent=10, Received=25, Avg Latency=6.5, Avg Hops=2
//! Network Summary: Total Sent=22, Total Received=56, Avg Latency=6.9, Avg Hops=2.25
//! ```
//!
//! ## Error Handling
//!
//! Typed errors use `thiserror`; application-level functions return
//! `color_eyre::eyre::Result` with context attached.

pub mod analysis;
pub mod config;
pub mod config_loader;
pub mod orchestrator;
pub mod utils;
