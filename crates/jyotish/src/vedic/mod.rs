pub mod houses;
pub mod karakas;
pub mod nakshatra;
pub mod normalize;
pub mod types;

pub use houses::{house_of, whole_sign_houses, HousePlacements};
pub use karakas::{rank_chara_karakas, CharaKarakas, KarakaAssignment, KarakaLabel};
pub use nakshatra::{get_nakshatra_for_longitude, nakshatra_index, MoonNakshatra};
pub use normalize::{sidereal_longitudes, CHART_SIDEREAL_MODE};
pub use types::{Planet, SiderealLongitudes, ALL_PLANETS, COMPUTED_PLANETS};
