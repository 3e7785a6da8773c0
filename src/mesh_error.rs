//! PartSieveError: Unified error type for part-sieve public APIs
//!
//! Errors split into two families: [`StateError`] for calls that are invalid
//! in the collection's current lifecycle state, and [`DataIntegrityError`] for
//! malformed input rejected at the API boundary.

use thiserror::Error;

use crate::topology::part_type::PartType;

/// Unified error type for part-sieve operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PartSieveError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),

    /// Metadata or read-range configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PartSieveError {
    /// True if this error was raised because of the collection lifecycle state.
    pub fn is_state_error(&self) -> bool {
        matches!(self, PartSieveError::State(_))
    }

    /// True if this error was raised because of malformed input data.
    pub fn is_data_integrity_error(&self) -> bool {
        matches!(self, PartSieveError::DataIntegrity(_))
    }
}

/// Operation is not valid in the collection's current state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// Mutation attempted while grids are finalized; reset the timestep first.
    #[error("collection is finalized; call reset_time_step_info before mutating it")]
    AlreadyFinalized,
    /// Grids requested before `finalize` was called.
    #[error("collection is not finalized; grids exist only after finalize")]
    NotFinalized,
    /// Collection was never initialized with part metadata.
    #[error("collection has not been initialized with part metadata")]
    NotInitialized,
    /// Point references were already renumbered to part-local ids.
    #[error("topology is frozen; cells cannot be inserted after topology finalization")]
    TopologyFrozen,
}

/// Input data violates a structural precondition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataIntegrityError {
    #[error("cell has {found} vertices; at most {max} are supported")]
    TooManyVertices { found: usize, max: usize },

    #[error("cell type {cell_type} expects {expected} vertices, got {found}")]
    VertexCountMismatch {
        cell_type: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("point ids are 1-based; got {0}")]
    ZeroPointId(i64),

    #[error("point id {id} is outside the global point pool of {num_points} points")]
    PointOutOfRange { id: i64, num_points: usize },

    #[error("{category} cell {index} is outside this collection's read range [{min}, {max})")]
    CellIndexOutOfRange {
        category: PartType,
        index: usize,
        min: usize,
        max: usize,
    },

    #[error("material id {id} is outside [1, {num_materials}]")]
    MaterialOutOfRange { id: usize, num_materials: usize },

    #[error("{category} cell {index} inserted after cell {previous}; global order must increase")]
    UnsortedCells {
        category: PartType,
        previous: usize,
        index: usize,
    },

    #[error("dead cell {cell} of part `{part}` does not follow previous dead cell {previous}")]
    UnsortedDeadCells {
        part: String,
        previous: usize,
        cell: usize,
    },

    #[error("dead cell {cell} of part `{part}` is outside its {cells} cells")]
    DeadCellOutOfRange {
        part: String,
        cell: usize,
        cells: usize,
    },

    #[error("{category} death flags hold {found} entries but the read range covers {expected}")]
    DeathFlagsTooLong {
        category: PartType,
        expected: usize,
        found: usize,
    },

    #[error("results buffer holds {found} values; {expected} required")]
    BufferTooShort { expected: usize, found: usize },

    #[error("tuple {index} is outside an array of {tuples} tuples")]
    TupleOutOfRange { index: usize, tuples: usize },

    #[error("expected {expected} components, found {found}")]
    ComponentMismatch { expected: usize, found: usize },

    #[error("arrays must have at least one component")]
    ZeroComponents,

    #[error("unknown cell type code {0}")]
    UnknownCellTypeCode(u8),

    #[error("cell property `{name}` already holds {capacity} tuples")]
    PropertyOverflow { name: String, capacity: usize },

    #[error("cell property `{name}` holds {tuples} tuples for {cells} cells")]
    PropertyLengthMismatch {
        name: String,
        cells: usize,
        tuples: usize,
    },

    #[error("local point {local} of part `{part}` is not referenced by any cell")]
    UnusedLocalPoint { part: String, local: usize },

    #[error("point array `{name}` has {found} tuples; {required} global points are referenced")]
    PointPoolTooSmall {
        name: String,
        required: usize,
        found: usize,
    },

    #[error("cell structure is malformed at offset {offset}")]
    MalformedCellStructure { offset: usize },
}
