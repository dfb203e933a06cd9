//! Benchmark profiles and utilities for the Lineage entity kernel.
//!
//! - [`reference_universe`]: scenes each holding one brain and a row of
//!   objects it drives
//! - [`reference_chain`]: a negate-then-square callback chain
//! - [`churn_order`]: deterministic shuffled indices via seed
//! - [`Particle`]: a minimal [`Constructible`] for raw allocator work

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lineage_arena::{Constructible, ConstructibleRecord};
use lineage_callback::{snippets, CallbackEngine, CallbackObject};
use lineage_core::AnyValue;
use lineage_ontology::{
    BrainStruct, ObjectStruct, OntologyError, Request, SceneStruct, Universe, UniverseConfig,
};

/// A bare allocator payload.
#[derive(Debug)]
pub struct Particle {
    record: ConstructibleRecord,
    /// Arbitrary payload.
    pub energy: u64,
}

impl Particle {
    /// A particle built in `record` with `energy`.
    pub fn new(record: ConstructibleRecord, energy: u64) -> Self {
        Self { record, energy }
    }
}

impl Constructible for Particle {
    fn record(&self) -> &ConstructibleRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut ConstructibleRecord {
        &mut self.record
    }
}

/// Build a universe with `scenes` scenes. Each scene holds one brain that
/// masters `objects_per_scene` objects.
///
/// Scenes are named `scene-{i}`; objects carry the local name `object-{j}`.
pub fn reference_universe(
    scenes: usize,
    objects_per_scene: usize,
) -> Result<Universe, OntologyError> {
    let mut universe = Universe::new(UniverseConfig::default())?;
    for i in 0..scenes {
        let scene = universe.create_scene(SceneStruct::named(format!("scene-{i}")))?;
        let brain = universe.create_brain(BrainStruct {
            parent: Request::from(scene),
            ..BrainStruct::default()
        })?;
        for j in 0..objects_per_scene {
            universe.create_object(ObjectStruct {
                local_name: format!("object-{j}"),
                parent: Request::from(scene),
                brain: Request::from(brain),
                ..ObjectStruct::default()
            })?;
        }
    }
    Ok(universe)
}

/// Build a chain that negates `seed` and then squares the running result
/// `depth` times.
pub fn reference_chain(seed: i32, depth: usize) -> CallbackEngine {
    let mut engine = CallbackEngine::new();
    let mut first = CallbackObject::with_callback(snippets::neg);
    first.create_callback_parameter("", AnyValue::I32(seed));
    engine.add_callback_object(first);
    for _ in 0..depth {
        engine.create_callback_object(snippets::square_last);
    }
    engine
}

/// A deterministic permutation of `0..count`.
///
/// Uses a multiplicative hash of the seed as sort key, so equal seeds give
/// equal orders.
pub fn churn_order(count: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..count).collect();
    order.sort_by_key(|&i| {
        seed.wrapping_mul(6364136223846793005)
            .wrapping_add((i as u64).wrapping_mul(1442695040888963407))
            .rotate_left(17)
    });
    order
}
