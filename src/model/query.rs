use std::collections::BTreeSet;
use std::fmt;

use bitflags::bitflags;
use simargs_combinator::Accumulator;

/// The lifecycle state of a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimulatorState {
    /// `--state=creating`
    Creating,
    /// `--state=shutdown`
    Shutdown,
    /// `--state=booting`
    Booting,
    /// `--state=booted`
    Booted,
    /// `--state=shutting-down`
    ShuttingDown,
}

impl SimulatorState {
    /// Every state, in the order they are matched on the command line.
    pub const ALL: [SimulatorState; 5] = [
        SimulatorState::Creating,
        SimulatorState::Shutdown,
        SimulatorState::Booting,
        SimulatorState::Booted,
        SimulatorState::ShuttingDown,
    ];

    /// The name used in `--state=<name>`.
    pub fn name(&self) -> &'static str {
        match self {
            SimulatorState::Creating => "creating",
            SimulatorState::Shutdown => "shutdown",
            SimulatorState::Booting => "booting",
            SimulatorState::Booted => "booted",
            SimulatorState::ShuttingDown => "shutting-down",
        }
    }
}

impl fmt::Display for SimulatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

bitflags! {
    /// The kinds of target a query may select.
    /// No kind at all means any kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TargetTypes: u8 {
        /// `--simulators`
        const SIMULATOR = 1 << 0;
        /// `--devices`
        const DEVICE = 1 << 1;
    }
}

flag_accumulator!(TargetTypes);

const OS_VERSION_NAMES: &[&str] = &[
    "iOS 8.1",
    "iOS 8.2",
    "iOS 8.3",
    "iOS 8.4",
    "iOS 9.0",
    "iOS 9.1",
    "iOS 9.2",
    "iOS 9.3",
    "iOS 10.0",
    "tvOS 9.0",
    "tvOS 9.1",
    "tvOS 9.2",
    "watchOS 2.0",
    "watchOS 2.1",
    "watchOS 2.2",
];

const DEVICE_MODEL_NAMES: &[&str] = &[
    "iPhone 4s",
    "iPhone 5",
    "iPhone 5s",
    "iPhone 6",
    "iPhone 6 Plus",
    "iPhone 6s",
    "iPhone 6s Plus",
    "iPhone SE",
    "iPad 2",
    "iPad Retina",
    "iPad Air",
    "iPad Air 2",
    "iPad Pro",
    "Apple TV 1080p",
    "Apple Watch - 38mm",
    "Apple Watch - 42mm",
];

/// A known operating system version, such as `iOS 9.3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OsVersion(&'static str);

impl OsVersion {
    /// Look up a version by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        OS_VERSION_NAMES
            .iter()
            .find(|known| **known == name)
            .copied()
            .map(OsVersion)
    }

    /// All known version names.
    pub fn names() -> &'static [&'static str] {
        OS_VERSION_NAMES
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A known device model, such as `iPhone 6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceModel(&'static str);

impl DeviceModel {
    /// Look up a model by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        DEVICE_MODEL_NAMES
            .iter()
            .find(|known| **known == name)
            .copied()
            .map(DeviceModel)
    }

    /// All known model names.
    pub fn names() -> &'static [&'static str] {
        DEVICE_MODEL_NAMES
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which targets an action applies to.
///
/// Every criterion narrows the selection; the identity (no criteria) selects every target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetQuery {
    /// Targets with any of these UDIDs.
    pub udids: BTreeSet<String>,
    /// Simulators in any of these states.
    pub states: BTreeSet<SimulatorState>,
    /// Targets of any of these kinds.
    pub target_types: TargetTypes,
    /// Targets running any of these versions.
    pub os_versions: BTreeSet<OsVersion>,
    /// Targets of any of these models.
    pub devices: BTreeSet<DeviceModel>,
    /// `--first <n>`: at most this many targets.
    pub count: Option<usize>,
}

impl TargetQuery {
    /// The query selecting every target.
    pub fn all() -> Self {
        Self::identity()
    }

    pub fn udids(udids: impl IntoIterator<Item = String>) -> Self {
        Self {
            udids: udids.into_iter().collect(),
            ..Self::identity()
        }
    }

    pub fn states(states: impl IntoIterator<Item = SimulatorState>) -> Self {
        Self {
            states: states.into_iter().collect(),
            ..Self::identity()
        }
    }

    pub fn target_types(target_types: TargetTypes) -> Self {
        Self {
            target_types,
            ..Self::identity()
        }
    }

    pub fn os_versions(os_versions: impl IntoIterator<Item = OsVersion>) -> Self {
        Self {
            os_versions: os_versions.into_iter().collect(),
            ..Self::identity()
        }
    }

    pub fn devices(devices: impl IntoIterator<Item = DeviceModel>) -> Self {
        Self {
            devices: devices.into_iter().collect(),
            ..Self::identity()
        }
    }

    pub fn of_count(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::identity()
        }
    }

    /// Whether the query selects every target.
    pub fn is_all(&self) -> bool {
        self == &Self::all()
    }
}

impl Accumulator for TargetQuery {
    fn identity() -> Self {
        Self::default()
    }

    fn append(self, other: Self) -> Self {
        Self {
            udids: self.udids.append(other.udids),
            states: self.states.append(other.states),
            target_types: self.target_types.append(other.target_types),
            os_versions: self.os_versions.append(other.os_versions),
            devices: self.devices.append(other.devices),
            count: self.count.append(other.count),
        }
    }
}

/// A field to describe each target with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatField {
    Udid,
    Name,
    Model,
    OsVersion,
    State,
    Architecture,
    ProcessIdentifier,
    ContainerApplicationProcessIdentifier,
}

impl FormatField {
    /// Every field, in the order they are matched on the command line.
    pub const ALL: [FormatField; 8] = [
        FormatField::Udid,
        FormatField::Name,
        FormatField::Model,
        FormatField::OsVersion,
        FormatField::State,
        FormatField::Architecture,
        FormatField::ProcessIdentifier,
        FormatField::ContainerApplicationProcessIdentifier,
    ];

    /// The name used in `--<name>`.
    pub fn name(&self) -> &'static str {
        match self {
            FormatField::Udid => "udid",
            FormatField::Name => "name",
            FormatField::Model => "model",
            FormatField::OsVersion => "os",
            FormatField::State => "state",
            FormatField::Architecture => "arch",
            FormatField::ProcessIdentifier => "pid",
            FormatField::ContainerApplicationProcessIdentifier => "container-pid",
        }
    }
}

/// The ordered fields to describe each target with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFormat {
    pub fields: Vec<FormatField>,
}
