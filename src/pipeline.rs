/**
 * File: /src/pipeline.rs
 * Created Date: Tuesday, June 30th 2026
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 6th August 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::proximity::{CooccurrenceBuilder, ProximityMatrix};
use crate::rca::RcaFilter;
use crate::table::{EmbedError, RelationTable, TableSource};

/// Pipeline配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// 是否应用RCA显著性过滤
    pub rca: bool,
    /// RCA阈值（含等于）
    pub rca_threshold: f64,
    /// 对角线自环
    pub self_loops: bool,
    /// 是否并行处理
    pub parallel: bool,
    /// 是否收集详细统计信息
    pub collect_stats: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            rca: true,
            rca_threshold: 1.0,
            self_loops: true,
            parallel: true,
            collect_stats: true,
        }
    }
}

/// Pipeline统计信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedStats {
    pub total_duration: Duration,
    pub prep_duration: Duration,
    pub filter_duration: Duration,
    pub build_duration: Duration,
    pub input_rows: usize,
    pub significant_rows: usize,
    pub categories: usize,
    pub proximity_distribution: ValueDistribution,
}

/// Summary of the off-diagonal proximity values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueDistribution {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Result of a pipeline run: the matrix plus optional stats.
#[derive(Debug, Clone)]
pub struct EmbedResult {
    pub matrix: ProximityMatrix,
    pub stats: Option<EmbedStats>,
}

impl EmbedResult {
    pub fn summary(&self) -> String {
        let mut summary = format!("Proximity matrix over {} categories", self.matrix.len());

        if let Some(stats) = &self.stats {
            summary.push_str(&format!(
                "\n{} of {} input rows significant",
                stats.significant_rows, stats.input_rows
            ));
            summary.push_str(&format!(
                "\nProximity range: {:.4} - {:.4} (avg: {:.4})",
                stats.proximity_distribution.min,
                stats.proximity_distribution.max,
                stats.proximity_distribution.mean
            ));
        }

        for (i, label) in self.matrix.labels().iter().take(5).enumerate() {
            let strongest = (0..self.matrix.len())
                .filter(|&j| j != i)
                .map(|j| self.matrix[(i, j)])
                .fold(0.0_f64, f64::max);
            summary.push_str(&format!(
                "\n  {}: strongest proximity {:.4}",
                label, strongest
            ));
        }

        if self.matrix.len() > 5 {
            summary.push_str(&format!("\n  ... and {} more", self.matrix.len() - 5));
        }

        summary
    }
}

/// 共现嵌入Pipeline
///
/// Normalize -> significance filter -> co-occurrence build, each stage
/// timed and logged. Stateless; a pipeline value can be reused across
/// inputs and threads.
#[derive(Debug, Clone, Default)]
pub struct EmbedPipeline {
    config: EmbedConfig,
}

impl EmbedPipeline {
    pub fn new(config: EmbedConfig) -> Self {
        EmbedPipeline { config }
    }

    pub fn builder() -> EmbedPipelineBuilder {
        EmbedPipelineBuilder::new()
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    pub fn run(&self, source: impl Into<TableSource>) -> Result<EmbedResult, EmbedError> {
        let start_time = Instant::now();
        info!(
            "Starting proximity embedding pipeline (rca: {}, self_loops: {})",
            self.config.rca, self.config.self_loops
        );

        // Step 1: 归一化
        let prep_start = Instant::now();
        let table = RelationTable::from_source(source)?;
        let prep_duration = prep_start.elapsed();
        let input_rows = table.len();
        debug!(
            "Normalized input into {} canonical rows in {:?}",
            input_rows, prep_duration
        );

        // Step 2: RCA过滤
        let filter_start = Instant::now();
        let table = if self.config.rca {
            RcaFilter::new(self.config.rca_threshold).filter(&table)
        } else {
            table
        };
        let filter_duration = filter_start.elapsed();
        let significant_rows = table.len();
        info!(
            "Significance filtering retained {} of {} rows in {:?}",
            significant_rows, input_rows, filter_duration
        );

        // Step 3: 共现矩阵
        let build_start = Instant::now();
        let builder = CooccurrenceBuilder {
            self_loops: self.config.self_loops,
            parallel: self.config.parallel,
        };
        let matrix = builder.build(&table);
        let build_duration = build_start.elapsed();

        let total_duration = start_time.elapsed();
        info!(
            "Pipeline completed in {:?}, {} categories embedded",
            total_duration,
            matrix.len()
        );

        let stats = if self.config.collect_stats {
            Some(Self::collect_stats(
                &matrix,
                total_duration,
                prep_duration,
                filter_duration,
                build_duration,
                input_rows,
                significant_rows,
            ))
        } else {
            None
        };

        Ok(EmbedResult { matrix, stats })
    }

    fn collect_stats(
        matrix: &ProximityMatrix,
        total_duration: Duration,
        prep_duration: Duration,
        filter_duration: Duration,
        build_duration: Duration,
        input_rows: usize,
        significant_rows: usize,
    ) -> EmbedStats {
        let n = matrix.len();
        let off_diagonal: Vec<f64> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| matrix[(i, j)])
            .collect();

        let proximity_distribution = if off_diagonal.is_empty() {
            ValueDistribution {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                std_dev: 0.0,
            }
        } else {
            ValueDistribution {
                min: Statistics::min(off_diagonal.iter()),
                max: Statistics::max(off_diagonal.iter()),
                mean: off_diagonal.iter().mean(),
                std_dev: if off_diagonal.len() > 1 {
                    off_diagonal.iter().std_dev()
                } else {
                    0.0
                },
            }
        };

        EmbedStats {
            total_duration,
            prep_duration,
            filter_duration,
            build_duration,
            input_rows,
            significant_rows,
            categories: n,
            proximity_distribution,
        }
    }
}

/// Pipeline构建器
#[derive(Debug, Clone, Default)]
pub struct EmbedPipelineBuilder {
    config: EmbedConfig,
}

impl EmbedPipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: EmbedConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EmbedConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rca(mut self, rca: bool) -> Self {
        self.config.rca = rca;
        self
    }

    pub fn rca_threshold(mut self, threshold: f64) -> Self {
        self.config.rca_threshold = threshold;
        self
    }

    pub fn self_loops(mut self, self_loops: bool) -> Self {
        self.config.self_loops = self_loops;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn collect_stats(mut self, collect_stats: bool) -> Self {
        self.config.collect_stats = collect_stats;
        self
    }

    pub fn build(self) -> EmbedPipeline {
        EmbedPipeline::new(self.config)
    }
}

/// The documented happy path: normalize, optionally filter, build.
///
/// # Example
/// ```
/// use fast_proximity::embed;
///
/// let data = vec![
///     ("cat1", "ent1", 2.0),
///     ("cat1", "ent2", 3.0),
///     ("cat2", "ent1", 4.0),
///     ("cat3", "ent3", 5.0),
/// ];
/// let matrix = embed(data, true, true).unwrap();
///
/// assert_eq!(matrix.len(), 3);
/// assert_eq!(matrix.get("cat1", "cat1"), Some(1.0));
/// assert_eq!(matrix.get("cat1", "cat2"), Some(0.0));
/// ```
pub fn embed(
    source: impl Into<TableSource>,
    rca: bool,
    self_loops: bool,
) -> Result<ProximityMatrix, EmbedError> {
    let pipeline = EmbedPipeline::builder()
        .rca(rca)
        .self_loops(self_loops)
        .collect_stats(false)
        .build();
    Ok(pipeline.run(source)?.matrix)
}
