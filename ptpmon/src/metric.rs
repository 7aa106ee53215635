//! The metrics and message events the monitor distinguishes.

use serde::Serialize;

/// The four clock metrics tracked per cadence.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClockStat {
    /// One-way delay measured from master to slave.
    MasterSlaveDelay,
    /// One-way delay measured from slave to master.
    SlaveMasterDelay,
    /// Mean of the two path delays.
    MeanPathDelay,
    /// Clock offset relative to the master.
    OffsetFromMaster,
}

impl ClockStat {
    /// Number of clock metrics.
    pub const COUNT: usize = 4;

    /// Every clock metric, in index order.
    pub const ALL: [ClockStat; Self::COUNT] = [
        ClockStat::MasterSlaveDelay,
        ClockStat::SlaveMasterDelay,
        ClockStat::MeanPathDelay,
        ClockStat::OffsetFromMaster,
    ];

    /// Stable index of this metric within a series bank.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The PTP message events counted per port.
///
/// Announce, sync and follow-up exchanges occur in both delay
/// mechanisms; delay-request/response only end-to-end; the pdelay
/// family only peer-to-peer. The monitor counts whatever the protocol
/// layer reports and leaves mechanism filtering to it.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MsgCounter {
    /// Announce message sent.
    AnnounceTx,
    /// Announce message received.
    AnnounceRx,
    /// Announce received from a foreign master.
    AnnounceForeignMasterRx,
    /// Sync message sent.
    SyncTx,
    /// Sync message received.
    SyncRx,
    /// Follow-up message sent.
    FollowupTx,
    /// Follow-up message received.
    FollowupRx,
    /// Delay request sent.
    DelayReqTx,
    /// Delay request received.
    DelayReqRx,
    /// Delay response sent.
    DelayRespTx,
    /// Delay response received.
    DelayRespRx,
    /// Peer delay request sent.
    PdelayReqTx,
    /// Peer delay request received.
    PdelayReqRx,
    /// Peer delay response sent.
    PdelayRespTx,
    /// Peer delay response received.
    PdelayRespRx,
    /// Peer delay response follow-up sent.
    PdelayRespFollowupTx,
    /// Peer delay response follow-up received.
    PdelayRespFollowupRx,
}

impl MsgCounter {
    /// Number of message events.
    pub const COUNT: usize = 17;

    /// Every message event, in index order.
    pub const ALL: [MsgCounter; Self::COUNT] = [
        MsgCounter::AnnounceTx,
        MsgCounter::AnnounceRx,
        MsgCounter::AnnounceForeignMasterRx,
        MsgCounter::SyncTx,
        MsgCounter::SyncRx,
        MsgCounter::FollowupTx,
        MsgCounter::FollowupRx,
        MsgCounter::DelayReqTx,
        MsgCounter::DelayReqRx,
        MsgCounter::DelayRespTx,
        MsgCounter::DelayRespRx,
        MsgCounter::PdelayReqTx,
        MsgCounter::PdelayReqRx,
        MsgCounter::PdelayRespTx,
        MsgCounter::PdelayRespRx,
        MsgCounter::PdelayRespFollowupTx,
        MsgCounter::PdelayRespFollowupRx,
    ];

    /// Stable index of this event within a counter window.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_events_fit_the_counter_cap() {
        assert!(MsgCounter::COUNT <= ptpmon_stats::MAX_COUNTERS);
        assert_eq!(MsgCounter::ALL.len(), MsgCounter::COUNT);
    }

    #[test]
    fn indices_are_sequential() {
        for (i, metric) in ClockStat::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
        for (i, msg) in MsgCounter::ALL.iter().enumerate() {
            assert_eq!(msg.index(), i);
        }
    }

    #[test]
    fn serializes_to_snake_case() {
        let name = serde_json::to_string(&ClockStat::OffsetFromMaster).expect("serializable");
        assert_eq!(name, "\"offset_from_master\"");
        let name = serde_json::to_string(&MsgCounter::PdelayRespFollowupRx).expect("serializable");
        assert_eq!(name, "\"pdelay_resp_followup_rx\"");
    }
}
