//! Event codes for the notify device's dispatch protocol

use std::fmt;

/// Single-byte operation selector carried in every protocol request.
///
/// The set is closed: firmware only understands these ten codes, so the
/// protocol engine takes the enum rather than a raw byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventCode {
    /// Ask the device which features it supports
    QueryDevice = 0x00,
    /// Announce the host driver version to firmware
    SetDriverVersion = 0x01,
    /// Read the board revision id
    GetBoardRevision = 0x02,
    /// Battery 1 state changed
    Bat1StateChange = 0x03,
    /// Battery 1 static information changed (also registers the battery)
    Bat1InfoChange = 0x04,
    /// Power source state changed
    PsuStateChange = 0x05,
    /// Power source information changed (also registers the power source)
    PsuInfoChange = 0x06,
    /// Battery 2 state changed
    Bat2StateChange = 0x07,
    /// Battery 2 static information changed (also registers the battery)
    Bat2InfoChange = 0x08,
    /// Program the thermal sensor trip point
    SensorTripPoint = 0x09,
}

impl EventCode {
    /// Every defined code, in numeric order.
    pub const ALL: [EventCode; 10] = [
        EventCode::QueryDevice,
        EventCode::SetDriverVersion,
        EventCode::GetBoardRevision,
        EventCode::Bat1StateChange,
        EventCode::Bat1InfoChange,
        EventCode::PsuStateChange,
        EventCode::PsuInfoChange,
        EventCode::Bat2StateChange,
        EventCode::Bat2InfoChange,
        EventCode::SensorTripPoint,
    ];

    /// The wire value of this code.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a raw notification value; `None` for anything outside the set.
    pub fn from_raw(code: u32) -> Option<EventCode> {
        Self::ALL
            .into_iter()
            .find(|event| u32::from(event.as_u8()) == code)
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventCode::QueryDevice => "query_device",
            EventCode::SetDriverVersion => "set_driver_version",
            EventCode::GetBoardRevision => "get_board_revision",
            EventCode::Bat1StateChange => "bat1_state_change",
            EventCode::Bat1InfoChange => "bat1_info_change",
            EventCode::PsuStateChange => "psu_state_change",
            EventCode::PsuInfoChange => "psu_info_change",
            EventCode::Bat2StateChange => "bat2_state_change",
            EventCode::Bat2InfoChange => "bat2_info_change",
            EventCode::SensorTripPoint => "sensor_trip_point",
        })
    }
}
