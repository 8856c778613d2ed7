use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("unknown quiz category: {0}")]
    Unknown(String),
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// One of the fixed quiz topics.
///
/// The wire id (`general-chemistry`, `mass-transfer`, ...) is what persisted
/// score tables and the question bank are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizCategory {
    GeneralChemistry,
    OrganicChemistry,
    InorganicChemistry,
    PhysicalChemistry,
    AnalyticalChemistry,
    BiochemicalChemistry,
    Thermodynamics,
    ChemicalEngineering,
    MassTransfer,
    HeatTransfer,
    FluidMechanics,
    ReactionEngineering,
    SeparationProcesses,
    ProcessControl,
}

impl QuizCategory {
    /// Every category, in selector display order.
    pub const ALL: [QuizCategory; 14] = [
        Self::GeneralChemistry,
        Self::OrganicChemistry,
        Self::InorganicChemistry,
        Self::PhysicalChemistry,
        Self::AnalyticalChemistry,
        Self::BiochemicalChemistry,
        Self::Thermodynamics,
        Self::ChemicalEngineering,
        Self::MassTransfer,
        Self::HeatTransfer,
        Self::FluidMechanics,
        Self::ReactionEngineering,
        Self::SeparationProcesses,
        Self::ProcessControl,
    ];

    /// Stable wire id used for storage keys and question records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GeneralChemistry => "general-chemistry",
            Self::OrganicChemistry => "organic-chemistry",
            Self::InorganicChemistry => "inorganic-chemistry",
            Self::PhysicalChemistry => "physical-chemistry",
            Self::AnalyticalChemistry => "analytical-chemistry",
            Self::BiochemicalChemistry => "biochemical-chemistry",
            Self::Thermodynamics => "thermodynamics",
            Self::ChemicalEngineering => "chemical-engineering",
            Self::MassTransfer => "mass-transfer",
            Self::HeatTransfer => "heat-transfer",
            Self::FluidMechanics => "fluid-mechanics",
            Self::ReactionEngineering => "reaction-engineering",
            Self::SeparationProcesses => "separation-processes",
            Self::ProcessControl => "process-control",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::GeneralChemistry => "General Chemistry",
            Self::OrganicChemistry => "Organic Chemistry",
            Self::InorganicChemistry => "Inorganic Chemistry",
            Self::PhysicalChemistry => "Physical Chemistry",
            Self::AnalyticalChemistry => "Analytical Chemistry",
            Self::BiochemicalChemistry => "Biochemical Chemistry",
            Self::Thermodynamics => "Thermodynamics",
            Self::ChemicalEngineering => "Chemical Engineering",
            Self::MassTransfer => "Mass Transfer",
            Self::HeatTransfer => "Heat Transfer",
            Self::FluidMechanics => "Fluid Mechanics",
            Self::ReactionEngineering => "Reaction Engineering",
            Self::SeparationProcesses => "Separation Processes",
            Self::ProcessControl => "Process Control",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::GeneralChemistry => "Fundamental chemical principles and concepts",
            Self::OrganicChemistry => "Carbon-based compounds and reactions",
            Self::InorganicChemistry => "Non-organic compounds and coordination chemistry",
            Self::PhysicalChemistry => "Chemical thermodynamics and kinetics",
            Self::AnalyticalChemistry => "Chemical analysis and instrumentation",
            Self::BiochemicalChemistry => "Chemistry of biological systems",
            Self::Thermodynamics => "Energy and entropy in chemical processes",
            Self::ChemicalEngineering => "Process design and chemical operations",
            Self::MassTransfer => "Movement of chemical species",
            Self::HeatTransfer => "Thermal energy transport mechanisms",
            Self::FluidMechanics => "Behavior of liquids and gases",
            Self::ReactionEngineering => "Design and analysis of chemical reactors",
            Self::SeparationProcesses => "Purification and separation techniques",
            Self::ProcessControl => "Automatic control of chemical processes",
        }
    }
}

impl fmt::Display for QuizCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == trimmed)
            .ok_or_else(|| CategoryError::Unknown(trimmed.to_owned()))
    }
}
