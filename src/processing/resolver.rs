//! Address to exchange point resolution.
//!
//! A coarse textual key narrows the prefix search on the directory side, then
//! every candidate is checked for real containment. The first containing
//! prefix in directory order wins; no longest-match ranking is done, so with
//! overlapping prefixes on different exchanges the answer depends on the order
//! the directory returns them in.

use crate::error::Result;
use crate::models::{coarse_key_for, parse_address, AddressFamily, ExchangeLan, ExchangePoint, Prefix};
use crate::peeringdb::{fetch_first, fetch_records, Directory, Entity, Filter};
use std::net::IpAddr;

pub struct PrefixResolver<'a, D: Directory + ?Sized> {
    directory: &'a D,
}

impl<'a, D: Directory + ?Sized> PrefixResolver<'a, D> {
    pub fn new(directory: &'a D) -> PrefixResolver<'a, D> {
        PrefixResolver { directory }
    }

    /// Find the exchange point whose prefix contains `addr`.
    ///
    /// # Returns
    /// * `Ok(Some(ix))` - first containing prefix resolved through its exchange-lan
    /// * `Ok(None)` - no prefix contains the address, or the prefix → lan → ix chain is broken
    /// * `Err(PdbError::InvalidAddress)` - `addr` is neither IPv4 nor IPv6
    pub fn resolve_exchange_for_address(&self, addr: &str) -> Result<Option<ExchangePoint>> {
        match self.find_prefix(addr)? {
            Some(prefix) => self.exchange_for_prefix(&prefix),
            None => Ok(None),
        }
    }

    /// Find the first directory prefix containing `addr`.
    pub fn find_prefix(&self, addr: &str) -> Result<Option<Prefix>> {
        let ip = parse_address(addr)?;
        let key = coarse_key_for(ip);
        log::debug!("find_prefix({addr}) ip={ip} coarse_key='{key}'");

        let candidates = self.candidates(&key)?;
        log::debug!("{} candidate prefix(es) for '{key}'", candidates.len());

        let found = first_containing(&candidates, ip).cloned();
        match &found {
            Some(prefix) => log::info!("{ip} is in {prefix}"),
            None => log::info!("No prefix found for {ip}"),
        }
        Ok(found)
    }

    /// Prefixes whose text starts with `key`. Records that do not decode are dropped.
    fn candidates(&self, key: &str) -> Result<Vec<Prefix>> {
        let raw = self
            .directory
            .fetch(Entity::IxPfx, &Filter::new().starts_with("prefix", key))?;
        Ok(raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Prefix>(value) {
                Ok(prefix) => Some(prefix),
                Err(e) => {
                    log::debug!("Skipping undecodable ixpfx record: {e}");
                    None
                }
            })
            .collect())
    }

    /// Follow prefix → exchange-lan → exchange point.
    pub fn exchange_for_prefix(&self, prefix: &Prefix) -> Result<Option<ExchangePoint>> {
        let lan: Option<ExchangeLan> = fetch_first(
            self.directory,
            Entity::IxLan,
            &Filter::new().eq("id", prefix.ixlan_id),
        )?;
        let Some(lan) = lan else {
            log::warn!("ixlan {} of prefix {} not found", prefix.ixlan_id, prefix.prefix);
            return Ok(None);
        };

        let ix: Option<ExchangePoint> =
            fetch_first(self.directory, Entity::Ix, &Filter::new().eq("id", lan.ix_id))?;
        if ix.is_none() {
            log::warn!("ix {} of ixlan {} not found", lan.ix_id, lan.id);
        }
        Ok(ix)
    }

    /// All prefixes of an exchange point, grouped by exchange-lan in directory order.
    pub fn prefixes_for_exchange(&self, ix_id: u32) -> Result<Vec<Prefix>> {
        let lans: Vec<ExchangeLan> =
            fetch_records(self.directory, Entity::IxLan, &Filter::new().eq("ix_id", ix_id))?;
        let mut prefixes = Vec::new();
        for lan in lans {
            let lan_prefixes: Vec<Prefix> = fetch_records(
                self.directory,
                Entity::IxPfx,
                &Filter::new().eq("ixlan_id", lan.id),
            )?;
            log::debug!("ixlan {} has {} prefix(es)", lan.id, lan_prefixes.len());
            prefixes.extend(lan_prefixes);
        }
        Ok(prefixes)
    }
}

/// First candidate that parses as a network of `ip`'s family and contains it.
///
/// Malformed prefix text is skipped.
pub fn first_containing(candidates: &[Prefix], ip: IpAddr) -> Option<&Prefix> {
    let family = AddressFamily::of(&ip);
    candidates.iter().find(|candidate| match candidate.network(family) {
        Some(net) => net.contains(&ip),
        None => {
            log::debug!("Skipping prefix '{}': not an {family} prefix", candidate.prefix);
            false
        }
    })
}
