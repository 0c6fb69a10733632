//! Continuous probability distributions.
//!
//! Each type independently implements [`crate::ContinuousDistribution`].
//! The families here share only the standard-normal helpers in
//! `crate::special`, the Brent quantile inversion in `crate::solvers1d`,
//! and the quadrature moments in `crate::integrals`.

mod alpha;
mod argus;
mod benktander1;
mod benktander2;
mod bhattacharjee;
mod birnbaum_saunders;
mod burr;
mod crystal_ball;
mod dagum;
mod gompertz;
mod kumaraswamy;
mod log_logistic;
mod lomax;
mod maxwell;
mod nakagami;

pub use alpha::Alpha;
pub use argus::Argus;
pub use benktander1::BenktanderType1;
pub use benktander2::BenktanderType2;
pub use bhattacharjee::Bhattacharjee;
pub use birnbaum_saunders::BirnbaumSaunders;
pub use burr::Burr;
pub use crystal_ball::CrystalBall;
pub use dagum::Dagum;
pub use gompertz::Gompertz;
pub use kumaraswamy::Kumaraswamy;
pub use log_logistic::LogLogistic;
pub use lomax::Lomax;
pub use maxwell::Maxwell;
pub use nakagami::Nakagami;
