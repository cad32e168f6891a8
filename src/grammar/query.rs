use simargs_combinator::prelude::*;

use crate::grammar::primitive::{of_int, of_udid};
use crate::model::{
    DeviceModel, FormatField, OsVersion, SimulatorState, TargetFormat, TargetQuery, TargetTypes,
};

pub fn of_simulator_state() -> Parser<SimulatorState> {
    alternative(
        SimulatorState::ALL
            .iter()
            .map(|state| Parser::of_string(format!("--state={}", state.name()), *state))
            .collect(),
    )
}

pub fn of_target_types() -> Parser<TargetTypes> {
    alternative(vec![
        Parser::of_string("--simulators", TargetTypes::SIMULATOR),
        Parser::of_string("--devices", TargetTypes::DEVICE),
    ])
}

pub fn of_os_version() -> Parser<OsVersion> {
    Parser::single("OS Version", |token| {
        OsVersion::from_name(token)
            .ok_or_else(|| ParseError::could_not_interpret("OS Version", Some(token)))
    })
}

pub fn of_device_model() -> Parser<DeviceModel> {
    Parser::single("Device", |token| {
        DeviceModel::from_name(token)
            .ok_or_else(|| ParseError::could_not_interpret("Device", Some(token)))
    })
}

/// `--first <n>`
pub fn of_count() -> Parser<usize> {
    succeeded(
        "--first",
        of_int().fmap(|count| {
            usize::try_from(count).map_err(|_| {
                ParseError::custom(format!("--first must be non-negative, but got {count}"))
            })
        }),
    )
}

/// `all`, or any combination of criteria narrowing the targets down.
pub fn of_target_query() -> Parser<TargetQuery> {
    alternative(vec![
        Parser::of_string("all", TargetQuery::all()),
        accumulate(
            1,
            vec![
                fragment(of_count(), TargetQuery::of_count),
                fragment(of_udid(), |udid| TargetQuery::udids([udid])),
                fragment(of_simulator_state(), |state| TargetQuery::states([state])),
                fragment(of_target_types(), TargetQuery::target_types),
                fragment(of_os_version(), |os| TargetQuery::os_versions([os])),
                fragment(of_device_model(), |device| TargetQuery::devices([device])),
            ],
        ),
    ])
    .described("Target Query")
}

pub fn of_target_format() -> Parser<TargetFormat> {
    alternative_many(
        1,
        FormatField::ALL
            .iter()
            .map(|field| Parser::of_string(format!("--{}", field.name()), *field))
            .collect(),
    )
    .map(|fields| TargetFormat { fields })
    .described("Target Format")
}
