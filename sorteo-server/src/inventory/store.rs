//! InventoryService — the 99-ticket state machine
//!
//! State model per ticket: available → reserved → sold, with reserved
//! expiring back to available on a timer and an admin override that forces
//! any state back to available.
//!
//! Remote sync model: the sheet is authoritative. A full fetch rebuilds
//! the local mapping; sales are appended best-effort and never rolled back
//! locally when the append fails ("fail open to local state"). Reservations
//! are purely local soft locks: they are never mirrored, and a refresh
//! replaces them with whatever the sheet says. Single-instance only — two
//! processes can race and the last sheet write wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use shared::error::ErrorCode;
use shared::models::{BuyerInfo, InventoryStats, Ticket, TicketNumber, TicketStatus};
use shared::{AppError, AppResult};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::sheets::{SheetsClient, parse_rows, sold_row};

struct Inner {
    tickets: RwLock<HashMap<TicketNumber, Ticket>>,
    /// Instant of the last successful remote fetch (read cache marker)
    last_fetch: RwLock<Option<Instant>>,
    sheets: Option<SheetsClient>,
    cache_ttl: Duration,
}

/// Cloneable handle over the shared ticket inventory
#[derive(Clone)]
pub struct InventoryService {
    inner: Arc<Inner>,
}

fn default_tickets() -> HashMap<TicketNumber, Ticket> {
    TicketNumber::all()
        .map(|n| (n, Ticket::fresh(n)))
        .collect()
}

impl InventoryService {
    /// Create an inventory with no remote store (local mode)
    pub fn new_local(cache_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                tickets: RwLock::new(default_tickets()),
                last_fetch: RwLock::new(None),
                sheets: None,
                cache_ttl,
            }),
        }
    }

    /// Create the inventory and load it before returning
    ///
    /// With a sheets client, the local view is rebuilt from the remote
    /// rows. Any failure (network, malformed body) degrades to the 99
    /// available defaults with a warning — initialization never fails.
    pub async fn initialize(sheets: Option<SheetsClient>, cache_ttl: Duration) -> Self {
        let service = Self {
            inner: Arc::new(Inner {
                tickets: RwLock::new(default_tickets()),
                last_fetch: RwLock::new(None),
                sheets,
                cache_ttl,
            }),
        };

        if service.inner.sheets.is_some() {
            match service.load_from_remote().await {
                Ok(()) => tracing::info!("Inventory loaded from remote sheet"),
                Err(e) => {
                    tracing::warn!(error = %e, "Sheet load failed, using local defaults");
                }
            }
        } else {
            tracing::warn!("No sheet configured, using local defaults");
        }

        service
    }

    /// Whether a remote store is configured
    pub fn has_remote(&self) -> bool {
        self.inner.sheets.is_some()
    }

    // ==================== Reads ====================

    /// Snapshot of all 99 tickets, ordered by number
    pub async fn get_all(&self) -> Vec<Ticket> {
        let tickets = self.inner.tickets.read().await;
        let mut all: Vec<Ticket> = tickets.values().cloned().collect();
        all.sort_by_key(|t| t.number);
        all
    }

    /// One ticket; `None` signals an invalid/out-of-range number
    pub async fn get(&self, number: TicketNumber) -> Option<Ticket> {
        self.inner.tickets.read().await.get(&number).cloned()
    }

    /// Sold tickets ordered by number (admin list, CSV export)
    pub async fn sold_tickets(&self) -> Vec<Ticket> {
        let tickets = self.inner.tickets.read().await;
        let mut sold: Vec<Ticket> = tickets.values().filter(|t| t.is_sold()).cloned().collect();
        sold.sort_by_key(|t| t.number);
        sold
    }

    /// Counts of available/reserved/sold over the fixed total
    pub async fn stats(&self) -> InventoryStats {
        let tickets = self.inner.tickets.read().await;
        let mut available = 0;
        let mut reserved = 0;
        let mut sold = 0;
        for ticket in tickets.values() {
            match ticket.status {
                TicketStatus::Available => available += 1,
                TicketStatus::Reserved => reserved += 1,
                TicketStatus::Sold => sold += 1,
            }
        }
        InventoryStats::new(available, reserved, sold)
    }

    // ==================== Reservation lifecycle ====================

    /// Reserve every currently-available number in the batch
    ///
    /// Numbers not available are silently skipped. Returns the subset
    /// actually reserved. One auto-release timer is scheduled for the
    /// batch; it cannot be cancelled early, so it re-checks status on fire
    /// and only reverts tickets still reserved — a ticket sold in the
    /// meantime stays sold.
    pub async fn reserve(&self, numbers: &[TicketNumber], duration: Duration) -> Vec<TicketNumber> {
        let deadline = Utc::now()
            + chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());

        let mut reserved = Vec::new();
        {
            let mut tickets = self.inner.tickets.write().await;
            for number in numbers {
                if let Some(ticket) = tickets.get_mut(number)
                    && ticket.is_available()
                {
                    ticket.status = TicketStatus::Reserved;
                    ticket.reserved_until = Some(deadline);
                    reserved.push(*number);
                }
            }
        }

        if !reserved.is_empty() {
            tracing::info!(count = reserved.len(), "Reserved tickets");
            let service = self.clone();
            let batch = reserved.clone();
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                let released = service.release_reserved(&batch).await;
                if !released.is_empty() {
                    tracing::info!(count = released.len(), "Reservation expired, released");
                }
            });
        }

        reserved
    }

    /// Release every currently-reserved number in the batch
    ///
    /// Tickets in any other state are left untouched. Returns the subset
    /// actually released.
    pub async fn release_reserved(&self, numbers: &[TicketNumber]) -> Vec<TicketNumber> {
        let mut released = Vec::new();
        let mut tickets = self.inner.tickets.write().await;
        for number in numbers {
            if let Some(ticket) = tickets.get_mut(number)
                && ticket.is_reserved()
            {
                ticket.status = TicketStatus::Available;
                ticket.reserved_until = None;
                released.push(*number);
            }
        }
        released
    }

    /// Release every reserved ticket (admin). Returns how many were cleared.
    pub async fn clear_reservations(&self) -> usize {
        let mut tickets = self.inner.tickets.write().await;
        let mut cleared = 0;
        for ticket in tickets.values_mut() {
            if ticket.is_reserved() {
                ticket.status = TicketStatus::Available;
                ticket.reserved_until = None;
                cleared += 1;
            }
        }
        cleared
    }

    // ==================== Sales ====================

    /// Sell every available-or-reserved number in the batch
    ///
    /// Already-sold numbers are skipped. The local transition is the
    /// accepted outcome; mirroring to the sheet is best-effort and a
    /// failure is logged, not propagated — the next refresh reconciles.
    pub async fn sell(&self, numbers: &[TicketNumber], buyer: &BuyerInfo) -> Vec<TicketNumber> {
        let sold_at = Utc::now();

        let mut sold = Vec::new();
        {
            let mut tickets = self.inner.tickets.write().await;
            for number in numbers {
                if let Some(ticket) = tickets.get_mut(number)
                    && !ticket.is_sold()
                {
                    ticket.status = TicketStatus::Sold;
                    ticket.buyer = Some(buyer.clone());
                    ticket.sold_at = Some(sold_at);
                    ticket.reserved_until = None;
                    sold.push(*number);
                }
            }
        }

        if sold.is_empty() {
            return sold;
        }
        tracing::info!(count = sold.len(), buyer = %buyer.nombre, "Tickets sold");

        if let Some(sheets) = &self.inner.sheets {
            let rows: Vec<Vec<String>> = sold
                .iter()
                .map(|n| sold_row(*n, buyer, sold_at))
                .collect();
            match sheets.append_rows(&rows).await {
                Ok(()) => {
                    // Remote changed under the cache; force the next fetch
                    *self.inner.last_fetch.write().await = None;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Sheet sync failed, sale kept locally");
                }
            }
        }

        sold
    }

    /// Admin override: force one ticket back to available from any state,
    /// clearing buyer and reservation fields. No confirmation here — that
    /// is the caller's job.
    pub async fn release(&self, number: TicketNumber) -> Ticket {
        let mut tickets = self.inner.tickets.write().await;
        let fresh = Ticket::fresh(number);
        tickets.insert(number, fresh.clone());
        tracing::info!(number = %number, "Ticket force-released");
        fresh
    }

    /// Admin override: reinitialize all 99 tickets to defaults
    pub async fn reset(&self) {
        let mut tickets = self.inner.tickets.write().await;
        *tickets = default_tickets();
        tracing::warn!("Inventory reset to defaults");
    }

    // ==================== Remote sync ====================

    /// Invalidate the read cache and re-fetch, replacing the whole local
    /// mapping. Errors when no sheet is configured or the fetch fails.
    /// Local reservations not yet mirrored (none ever are) are lost —
    /// accepted limitation of the remote-authoritative model.
    pub async fn refresh(&self) -> AppResult<()> {
        if self.inner.sheets.is_none() {
            return Err(AppError::new(ErrorCode::SyncNotConfigured));
        }
        *self.inner.last_fetch.write().await = None;
        self.load_from_remote().await
    }

    /// Re-fetch only when the read cache is older than the freshness
    /// window. Used by the periodic refresh task.
    pub async fn sync_if_stale(&self) -> AppResult<()> {
        if self.inner.sheets.is_none() {
            return Ok(());
        }
        if let Some(last) = *self.inner.last_fetch.read().await
            && last.elapsed() < self.inner.cache_ttl
        {
            return Ok(());
        }
        self.load_from_remote().await
    }

    async fn load_from_remote(&self) -> AppResult<()> {
        let sheets = self
            .inner
            .sheets
            .as_ref()
            .ok_or_else(|| AppError::new(ErrorCode::SyncNotConfigured))?;

        let values = sheets.fetch_values().await?;
        let rows = parse_rows(&values);

        let mut rebuilt = default_tickets();
        for row in rows {
            let ticket = match row.status {
                TicketStatus::Sold => {
                    let buyer = BuyerInfo {
                        nombre: row.buyer.unwrap_or_default(),
                        telefono: row.phone.unwrap_or_default(),
                        email: row.email,
                        paypal_order_id: None,
                        paypal_payer_id: None,
                    };
                    Ticket::sold(row.number, buyer, row.timestamp)
                }
                // Reservations are local soft locks; a remote "reserved"
                // row has no deadline we could honor, so it reads available
                _ => Ticket::fresh(row.number),
            };
            rebuilt.insert(row.number, ticket);
        }

        {
            let mut tickets = self.inner.tickets.write().await;
            *tickets = rebuilt;
        }
        *self.inner.last_fetch.write().await = Some(Instant::now());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(30);

    fn n(s: &str) -> TicketNumber {
        TicketNumber::parse(s).unwrap()
    }

    fn buyer() -> BuyerInfo {
        BuyerInfo::new("Ana", "88880000").with_email("ana@email.com")
    }

    #[tokio::test]
    async fn test_defaults_are_99_available() {
        let inv = InventoryService::new_local(TTL);
        let stats = inv.stats().await;
        assert_eq!(stats.total, 99);
        assert_eq!(stats.available, 99);
        assert_eq!(stats.sold, 0);
        assert_eq!(stats.reserved, 0);
        assert_eq!(stats.percentage, 0);

        let all = inv.get_all().await;
        assert_eq!(all.len(), 99);
        assert!(all.iter().all(|t| t.invariant_holds()));
    }

    #[tokio::test]
    async fn test_get_unknown_number_is_none() {
        let inv = InventoryService::new_local(TTL);
        assert!(TicketNumber::parse("100").is_none());
        assert!(inv.get(n("099")).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reserve_then_double_reserve() {
        let inv = InventoryService::new_local(TTL);
        let duration = Duration::from_secs(1);

        let before = Utc::now();
        let first = inv.reserve(&[n("005")], duration).await;
        assert_eq!(first, vec![n("005")]);

        let ticket = inv.get(n("005")).await.unwrap();
        assert!(ticket.is_reserved());
        let deadline = ticket.reserved_until.unwrap();
        let expected = before + chrono::Duration::seconds(1);
        assert!((deadline - expected).num_milliseconds().abs() < 500);

        // Second reserve of the same number yields an empty list
        let second = inv.reserve(&[n("005")], duration).await;
        assert!(second.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reservation_expires_back_to_available() {
        let inv = InventoryService::new_local(TTL);
        inv.reserve(&[n("005")], Duration::from_secs(1)).await;

        tokio::time::advance(Duration::from_millis(1100)).await;
        // Let the auto-release timer run
        for _ in 0..50 {
            tokio::task::yield_now().await;
            if inv.get(n("005")).await.unwrap().is_available() {
                break;
            }
        }

        let ticket = inv.get(n("005")).await.unwrap();
        assert!(ticket.is_available());
        assert!(ticket.reserved_until.is_none());
        assert!(ticket.invariant_holds());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sold_ticket_survives_expiry_timer() {
        let inv = InventoryService::new_local(TTL);
        inv.reserve(&[n("005")], Duration::from_secs(1)).await;

        let sold = inv.sell(&[n("005")], &buyer()).await;
        assert_eq!(sold, vec![n("005")]);

        // Timer fires after the sale; it must not revert the ticket
        tokio::time::advance(Duration::from_millis(1100)).await;
        for _ in 0..50 {
            tokio::task::yield_now().await;
        }

        let ticket = inv.get(n("005")).await.unwrap();
        assert!(ticket.is_sold());
        assert_eq!(ticket.buyer.as_ref().unwrap().nombre, "Ana");
    }

    #[tokio::test]
    async fn test_sell_available_and_repeat() {
        let inv = InventoryService::new_local(TTL);

        let sold = inv.sell(&[n("005")], &buyer()).await;
        assert_eq!(sold, vec![n("005")]);

        let ticket = inv.get(n("005")).await.unwrap();
        assert!(ticket.is_sold());
        assert!(ticket.sold_at.is_some());
        assert!(ticket.invariant_holds());

        // Selling again returns an empty sold-list
        let again = inv.sell(&[n("005")], &buyer()).await;
        assert!(again.is_empty());
    }

    #[tokio::test]
    async fn test_sell_mixed_batch_skips_sold() {
        let inv = InventoryService::new_local(TTL);
        inv.sell(&[n("001")], &buyer()).await;
        inv.reserve(&[n("002")], Duration::from_secs(60)).await;

        let sold = inv.sell(&[n("001"), n("002"), n("003")], &buyer()).await;
        assert_eq!(sold, vec![n("002"), n("003")]);

        let stats = inv.stats().await;
        assert_eq!(stats.sold, 3);
        assert_eq!(stats.available + stats.reserved + stats.sold, 99);
    }

    #[tokio::test]
    async fn test_release_forces_any_status() {
        let inv = InventoryService::new_local(TTL);
        inv.sell(&[n("005")], &buyer()).await;

        let released = inv.release(n("005")).await;
        assert!(released.is_available());
        assert!(released.buyer.is_none());
        assert!(released.sold_at.is_none());

        let ticket = inv.get(n("005")).await.unwrap();
        assert!(ticket.is_available());
        assert!(ticket.invariant_holds());
    }

    #[tokio::test]
    async fn test_release_reserved_ignores_other_states() {
        let inv = InventoryService::new_local(TTL);
        inv.sell(&[n("010")], &buyer()).await;

        let released = inv.release_reserved(&[n("010"), n("011")]).await;
        assert!(released.is_empty());
        assert!(inv.get(n("010")).await.unwrap().is_sold());
    }

    #[tokio::test]
    async fn test_clear_reservations_counts() {
        let inv = InventoryService::new_local(TTL);
        inv.reserve(&[n("001"), n("002"), n("003")], Duration::from_secs(600))
            .await;
        inv.sell(&[n("004")], &buyer()).await;

        assert_eq!(inv.clear_reservations().await, 3);
        let stats = inv.stats().await;
        assert_eq!(stats.reserved, 0);
        assert_eq!(stats.sold, 1);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let inv = InventoryService::new_local(TTL);
        inv.sell(&[n("001"), n("002")], &buyer()).await;
        inv.reset().await;

        let stats = inv.stats().await;
        assert_eq!(stats.available, 99);
        assert_eq!(stats.sold, 0);
    }

    #[tokio::test]
    async fn test_refresh_without_remote_errors() {
        let inv = InventoryService::new_local(TTL);
        let err = inv.refresh().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SyncNotConfigured);
        // sync_if_stale is a no-op instead
        assert!(inv.sync_if_stale().await.is_ok());
    }

    #[tokio::test]
    async fn test_buyer_fields_iff_sold_across_lifecycle() {
        let inv = InventoryService::new_local(TTL);
        inv.reserve(&[n("020")], Duration::from_secs(600)).await;
        inv.sell(&[n("021")], &buyer()).await;
        inv.release(n("022")).await;

        for ticket in inv.get_all().await {
            assert!(ticket.invariant_holds(), "invariant broken for {}", ticket.number);
            assert_eq!(ticket.buyer.is_some(), ticket.is_sold());
        }
    }
}
