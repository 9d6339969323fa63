use crate::error::ScrapeError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar date of a game, as parsed from the game-log table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl GameDate {
    /// Build a date, rejecting anything that is not a real calendar day.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ScrapeError> {
        if year <= 0 || NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(ScrapeError::Parse(format!(
                "invalid game date: {}-{}-{}",
                year, month, day
            )));
        }
        Ok(Self { year, month, day })
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

/// Whether the tracked player's team was at home or on the road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Home,
    Away,
}

/// One row of the season game log: when the game was played, where, and
/// against whom. Produced by the game-log scraper in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: GameDate,
    pub location: Location,
    pub opponent: String,
}

/// Canonical identifier for an NBA franchise, as required by the
/// play-by-play source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    AtlantaHawks,
    BostonCeltics,
    BrooklynNets,
    CharlotteHornets,
    ChicagoBulls,
    ClevelandCavaliers,
    DallasMavericks,
    DenverNuggets,
    DetroitPistons,
    GoldenStateWarriors,
    HoustonRockets,
    IndianaPacers,
    LosAngelesClippers,
    LosAngelesLakers,
    MemphisGrizzlies,
    MiamiHeat,
    MilwaukeeBucks,
    MinnesotaTimberwolves,
    NewOrleansPelicans,
    NewYorkKnicks,
    OklahomaCityThunder,
    OrlandoMagic,
    Philadelphia76ers,
    PhoenixSuns,
    PortlandTrailBlazers,
    SacramentoKings,
    SanAntonioSpurs,
    TorontoRaptors,
    UtahJazz,
    WashingtonWizards,
}

impl Team {
    /// Map the 3-letter abbreviation used on basketball-reference.com to the
    /// canonical franchise. Covers all 30 teams; anything else is `None`.
    pub fn from_franchise_code(code: &str) -> Option<Team> {
        let team = match code {
            "ATL" => Team::AtlantaHawks,
            "BOS" => Team::BostonCeltics,
            "BRK" => Team::BrooklynNets,
            "CHO" => Team::CharlotteHornets,
            "CHI" => Team::ChicagoBulls,
            "CLE" => Team::ClevelandCavaliers,
            "DAL" => Team::DallasMavericks,
            "DEN" => Team::DenverNuggets,
            "DET" => Team::DetroitPistons,
            "GSW" => Team::GoldenStateWarriors,
            "HOU" => Team::HoustonRockets,
            "IND" => Team::IndianaPacers,
            "LAC" => Team::LosAngelesClippers,
            "LAL" => Team::LosAngelesLakers,
            "MEM" => Team::MemphisGrizzlies,
            "MIA" => Team::MiamiHeat,
            "MIL" => Team::MilwaukeeBucks,
            "MIN" => Team::MinnesotaTimberwolves,
            "NOP" => Team::NewOrleansPelicans,
            "NYK" => Team::NewYorkKnicks,
            "OKC" => Team::OklahomaCityThunder,
            "ORL" => Team::OrlandoMagic,
            "PHI" => Team::Philadelphia76ers,
            "PHO" => Team::PhoenixSuns,
            "POR" => Team::PortlandTrailBlazers,
            "SAC" => Team::SacramentoKings,
            "SAS" => Team::SanAntonioSpurs,
            "TOR" => Team::TorontoRaptors,
            "UTA" => Team::UtahJazz,
            "WAS" => Team::WashingtonWizards,
            _ => return None,
        };
        Some(team)
    }

    /// The 3-letter code basketball-reference uses for this franchise.
    pub fn franchise_code(&self) -> &'static str {
        match self {
            Team::AtlantaHawks => "ATL",
            Team::BostonCeltics => "BOS",
            Team::BrooklynNets => "BRK",
            Team::CharlotteHornets => "CHO",
            Team::ChicagoBulls => "CHI",
            Team::ClevelandCavaliers => "CLE",
            Team::DallasMavericks => "DAL",
            Team::DenverNuggets => "DEN",
            Team::DetroitPistons => "DET",
            Team::GoldenStateWarriors => "GSW",
            Team::HoustonRockets => "HOU",
            Team::IndianaPacers => "IND",
            Team::LosAngelesClippers => "LAC",
            Team::LosAngelesLakers => "LAL",
            Team::MemphisGrizzlies => "MEM",
            Team::MiamiHeat => "MIA",
            Team::MilwaukeeBucks => "MIL",
            Team::MinnesotaTimberwolves => "MIN",
            Team::NewOrleansPelicans => "NOP",
            Team::NewYorkKnicks => "NYK",
            Team::OklahomaCityThunder => "OKC",
            Team::OrlandoMagic => "ORL",
            Team::Philadelphia76ers => "PHI",
            Team::PhoenixSuns => "PHO",
            Team::PortlandTrailBlazers => "POR",
            Team::SacramentoKings => "SAC",
            Team::SanAntonioSpurs => "SAS",
            Team::TorontoRaptors => "TOR",
            Team::UtahJazz => "UTA",
            Team::WashingtonWizards => "WAS",
        }
    }
}

/// One play-by-play event. The schema is owned by the upstream box-score
/// page; this crate only carries it through to CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayByPlayRow {
    pub period: u32,
    pub remaining_time: String,
    /// Which side acted: `AWAY`, `HOME`, or empty for neutral events
    /// (period start, jump balls, etc).
    pub side: String,
    pub away_score: u32,
    pub home_score: u32,
    pub description: String,
}

/// Outcome counts for one export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub exported: usize,
    pub failed: usize,
}
