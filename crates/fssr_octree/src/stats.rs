use crate::{NodeId, Octree};

use fssr_core::Octant;
use std::fmt;
use std::io;
use tracing::info;

/// A summary of the shape of an `Octree`, for logging and progress reports.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OctreeStats {
    pub num_samples: usize,
    pub num_nodes: usize,
    /// The number of levels in the deepest branch. Zero for an empty octree.
    pub num_levels: usize,
    /// The number of samples stored at each level, with one entry per level.
    pub samples_per_level: Vec<usize>,
}

impl fmt::Display for OctreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Octree contains {} samples in {} nodes on {} levels.",
            self.num_samples, self.num_nodes, self.num_levels
        )?;
        for (level, count) in self
            .samples_per_level
            .iter()
            .enumerate()
            .skip_while(|(_, count)| **count == 0)
        {
            writeln!(f, "  Level {}: {} samples", level, count)?;
        }

        Ok(())
    }
}

impl<S> Octree<S> {
    /// The number of levels in the deepest branch, counting the root as one level.
    pub fn num_levels(&self) -> usize {
        self.samples_per_level().len()
    }

    /// The number of samples stored at each level. Levels without samples are included, up to the deepest level.
    pub fn samples_per_level(&self) -> Vec<usize> {
        let mut per_level = Vec::new();
        if self.is_empty() {
            return per_level;
        }

        let mut stack = vec![(NodeId::Root, 0)];
        while let Some((id, level)) = stack.pop() {
            let node = match self.node(id) {
                Some(node) => node,
                None => continue,
            };
            if per_level.len() <= level {
                per_level.resize(level + 1, 0);
            }
            per_level[level] += node.samples().len();
            if let Some(block) = node.children() {
                stack.extend(
                    Octant::ALL
                        .iter()
                        .map(|octant| (NodeId::child(block, *octant), level + 1)),
                );
            }
        }

        per_level
    }

    pub fn stats(&self) -> OctreeStats {
        let samples_per_level = self.samples_per_level();

        OctreeStats {
            num_samples: self.num_samples(),
            num_nodes: self.num_nodes(),
            num_levels: samples_per_level.len(),
            samples_per_level,
        }
    }

    /// Writes a human-readable summary, as formatted by `OctreeStats`.
    pub fn print_stats(&self, out: &mut impl io::Write) -> io::Result<()> {
        write!(out, "{}", self.stats())
    }

    /// Emits the summary through `tracing`, one event per line.
    pub fn log_stats(&self) {
        for line in self.stats().to_string().lines() {
            info!("{}", line);
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
