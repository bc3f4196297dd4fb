/*
 * File: /src/lib.rs
 * Created Date: Tuesday, June 16th 2026
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 6th August 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */

//! Bipartite co-occurrence embeddings for categorical relational data.
//!
//! Raw (category, entity[, value]) records go through three stages:
//! normalization into a canonical 3-column table, Revealed Comparative
//! Advantage significance filtering, and construction of a square symmetric
//! category-by-category proximity matrix normalized by the larger
//! category's entity-set size.
//!
//! [`embed`] is the happy path; [`prep_data`], [`filter_significant`] and
//! [`co_occurrence`] expose the stages individually, and [`EmbedPipeline`]
//! adds configuration, logging and run statistics on top.

pub mod pipeline;
pub mod proximity;
pub mod rca;
pub mod table;

pub use pipeline::{
    embed, EmbedConfig, EmbedPipeline, EmbedPipelineBuilder, EmbedResult, EmbedStats,
    ValueDistribution,
};
pub use proximity::{co_occurrence, CooccurrenceBuilder, ProximityMatrix};
pub use rca::{filter_significant, RcaFilter};
pub use table::{prep_data, Column, EmbedError, Relation, RelationTable, TableSource};
