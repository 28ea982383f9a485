//! `cr-spatial` — road network, spatial indexing, named places and routing.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`network`]   | `RoadNetwork` (CSR), `RoadNetworkBuilder`                 |
//! | [`index`]     | `SpatialIndex` (R-tree nearest-node lookup)               |
//! | [`registry`]  | `LocationRegistry`, `NamedLocation`, `LocationKind`       |
//! | [`router`]    | `Router` trait, `Route`, `DijkstraRouter`                 |
//! | [`error`]     | `GraphLoadError`, `SpatialError`, `SpatialResult<T>`      |
//!
//! Data flows leaf-first: a loader fills a `RoadNetworkBuilder`, the built
//! network feeds one `SpatialIndex`, the index snaps registry entries to
//! nodes, and the router turns node pairs into routes.  Nothing here reads
//! files or touches the network.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod error;
pub mod index;
pub mod network;
pub mod registry;
pub mod router;


pub use error::{GraphLoadError, SpatialError, SpatialResult};
pub use index::SpatialIndex;
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use registry::{LocationKind, LocationRegistry, NamedLocation};
pub use router::{DijkstraRouter, Route, Router};
