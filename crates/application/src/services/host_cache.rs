use arpscope_domain::{compare_host_keys, Event, Host, MacAddress, ValidationErrors};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use super::event_log::EventLog;
use crate::ports::Clock;

struct CacheState {
    hosts: HashMap<String, Host>,
    events: EventLog,
}

/// Live `ip -> Host` table fed by captured ARP traffic.
///
/// Readers share the lock; every mutation (including the stale removal done
/// by [`HostCache::lookup`]) holds it exclusively for exactly one operation.
/// Events are appended under the same write lock as the mutation that caused
/// them, so the event log is a linearization of cache mutations.
///
/// The cache never looks at the clock on its own schedule: expiry only
/// happens through `lookup` and `expire_hosts` with caller supplied
/// thresholds.
pub struct HostCache {
    state: RwLock<CacheState>,
    clock: Arc<dyn Clock>,
}

impl HostCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(CacheState {
                hosts: HashMap::new(),
                events: EventLog::new(),
            }),
            clock,
        }
    }

    pub fn with_max_events(clock: Arc<dyn Clock>, max_events: usize) -> Self {
        Self {
            state: RwLock::new(CacheState {
                hosts: HashMap::new(),
                events: EventLog::with_max_events(max_events),
            }),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Validate and install a binding stamped with the current clock time.
    pub fn add_host(&self, ip: &str, mac: &str, comment: &str) -> Result<(), ValidationErrors> {
        self.add_host_at(ip, mac, comment, self.clock.now())
    }

    pub fn add_host_at(
        &self,
        ip: &str,
        mac: &str,
        comment: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), ValidationErrors> {
        let host = Host::parse(ip, mac, comment, timestamp)?;
        self.install(host);
        Ok(())
    }

    /// Typed variant for bindings that were already decoded from a frame.
    pub fn add_observation(&self, ip: IpAddr, mac: MacAddress, comment: &str) {
        self.install(Host::new(ip, mac, self.clock.now(), comment));
    }

    pub fn add_observation_at(
        &self,
        ip: IpAddr,
        mac: MacAddress,
        comment: &str,
        timestamp: DateTime<Utc>,
    ) {
        self.install(Host::new(ip, mac, timestamp, comment));
    }

    fn install(&self, host: Host) {
        let key = host.key();
        let mut guard = self.write();
        let state = &mut *guard;

        let change = state
            .hosts
            .get(&key)
            .filter(|current| current.mac() != host.mac())
            .map(|current| {
                Event::mac_changed(host.ip(), current.mac(), host.mac(), host.timestamp())
            });

        if let Some(event) = change {
            state.events.record(event);
        }

        state.hosts.insert(key, host);
    }

    /// Current binding for `ip`, unless it is older than `since`, in which
    /// case it is dropped and `None` is returned.
    pub fn lookup(&self, ip: &str, since: DateTime<Utc>) -> Option<Host> {
        let key = canonical_key(ip)?;

        {
            let state = self.read();
            match state.hosts.get(&key) {
                None => return None,
                Some(host) if !host.is_stale(since) => return Some(host.clone()),
                Some(_) => {}
            }
        }

        let mut state = self.write();
        // Re-check: the entry may have been refreshed between the two locks.
        let stale = match state.hosts.get(&key) {
            Some(host) if !host.is_stale(since) => return Some(host.clone()),
            Some(_) => true,
            None => false,
        };

        if stale {
            state.hosts.remove(&key);
            debug!(ip = %key, "Dropped stale host on lookup");
        }
        None
    }

    /// Remove every host last seen before `since`, recording one expiry
    /// event per removed host. Returns the number removed.
    pub fn expire_hosts(&self, since: DateTime<Utc>) -> usize {
        let now = self.clock.now();
        let mut guard = self.write();
        let state = &mut *guard;

        let mut stale: Vec<String> = state
            .hosts
            .iter()
            .filter(|(_, host)| host.is_stale(since))
            .map(|(key, _)| key.clone())
            .collect();
        stale.sort_by(|a, b| compare_host_keys(a, b));

        for key in &stale {
            state.hosts.remove(key);
            state.events.record(Event::expired(key, now));
        }

        stale.len()
    }

    /// Remove `ip` if present. Explicit deletion is not recorded as an event.
    pub fn delete_host(&self, ip: &str) -> bool {
        match canonical_key(ip) {
            Some(key) => self.write().hosts.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.read().hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().hosts.is_empty()
    }

    /// Copy of the table ordered by numeric address.
    pub fn snapshot(&self) -> Vec<(String, Host)> {
        let mut hosts: Vec<(String, Host)> = self
            .read()
            .hosts
            .iter()
            .map(|(key, host)| (key.clone(), host.clone()))
            .collect();
        hosts.sort_by(|a, b| a.1.ip().cmp(&b.1.ip()));
        hosts
    }

    pub fn events(&self) -> Vec<Event> {
        self.read().events.iter().cloned().collect()
    }

    pub fn event_count(&self) -> usize {
        self.read().events.len()
    }

    // Entries are replaced wholesale, so a poisoned lock still guards
    // consistent data.
    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn canonical_key(ip: &str) -> Option<String> {
    ip.trim()
        .parse::<IpAddr>()
        .ok()
        .map(|ip| ip.to_canonical().to_string())
}
