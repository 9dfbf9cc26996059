pub mod formation;
pub mod injury;
pub mod player;
pub mod signals;

pub use formation::{Formation, FORMATION_433};
pub use injury::{InjuryHistory, InjuryRecord, Severity};
pub use player::{Player, PositionGroup, Roster};
pub use signals::{PlayerSignals, SignalTable};
