//! WhatsApp notification links.
//!
//! Sales are confirmed over WhatsApp: the API returns a `wa.me` link with
//! the purchase summary prefilled so the buyer only has to press send.
//! The server never talks to WhatsApp itself.

use shared::models::{BuyerInfo, PricingQuote, TicketNumber};

/// Builds prefilled `wa.me` links for a fixed receiving number
#[derive(Debug, Clone)]
pub struct WhatsAppLink {
    number: String,
}

impl WhatsAppLink {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }

    /// Link for a manually-paid purchase (bank transfer, cash)
    pub fn manual_purchase(
        &self,
        numbers: &[TicketNumber],
        buyer: &BuyerInfo,
        total_cordobas: f64,
    ) -> String {
        let message = format!(
            "🏆 *SORTEO - NUEVA COMPRA*\n\n\
             👤 *Cliente:* {}\n\
             📱 *Teléfono:* {}\n\
             📧 *Email:* {}\n\n\
             🎯 *Números:* {}\n\
             💰 *Total:* {} córdobas\n\n\
             _Mensaje generado automáticamente_",
            buyer.nombre,
            buyer.telefono,
            buyer.email_or_empty(),
            join_numbers(numbers),
            total_cordobas,
        );
        self.link_for(&message)
    }

    /// Link for a completed PayPal payment, with the fee breakdown
    pub fn paypal_purchase(
        &self,
        numbers: &[TicketNumber],
        buyer: &BuyerInfo,
        quote: &PricingQuote,
    ) -> String {
        let message = format!(
            "🏆 *SORTEO - PAGO PAYPAL EXITOSO* 💳\n\n\
             👤 *Cliente:* {}\n\
             📱 *Teléfono:* {}\n\
             📧 *Email:* {}\n\n\
             🎯 *Números comprados:* {}\n\
             💰 *Total pagado:* ₡{} (${:.2} USD)\n\
             💳 *Comisión PayPal:* ${:.2} USD\n\n\
             *Detalles de PayPal:*\n\
             🆔 *Order ID:* {}\n\
             👤 *Payer ID:* {}\n\
             ✅ *Estado:* PAGADO\n\n\
             _Mensaje generado automáticamente_",
            buyer.nombre,
            buyer.telefono,
            buyer.email_or_empty(),
            join_numbers(numbers),
            quote.total_cordobas,
            quote.total_usd,
            quote.paypal_fees,
            buyer.paypal_order_id.as_deref().unwrap_or("-"),
            buyer.paypal_payer_id.as_deref().unwrap_or("-"),
        );
        self.link_for(&message)
    }

    fn link_for(&self, message: &str) -> String {
        let base = format!("https://wa.me/{}", self.number);
        match reqwest::Url::parse_with_params(&base, &[("text", message)]) {
            Ok(url) => url.to_string(),
            // wa.me with a fixed number always parses; keep a bare link as backstop
            Err(_) => base,
        }
    }
}

fn join_numbers(numbers: &[TicketNumber]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> TicketNumber {
        TicketNumber::parse(s).unwrap()
    }

    #[test]
    fn test_manual_link_shape() {
        let link = WhatsAppLink::new("50588888888");
        let buyer = BuyerInfo::new("Ana", "88880000").with_email("ana@email.com");
        let url = link.manual_purchase(&[n("005"), n("042")], &buyer, 140.0);

        assert!(url.starts_with("https://wa.me/50588888888?text="));
        // The message is URL-encoded in the query string
        assert!(!url.contains(' '));
        assert!(url.contains("text="));

        let parsed = reqwest::Url::parse(&url).unwrap();
        let (_, text) = parsed.query_pairs().find(|(k, _)| k == "text").unwrap();
        assert!(text.contains("005, 042"));
        assert!(text.contains("Ana"));
        assert!(text.contains("140 córdobas"));
    }

    #[test]
    fn test_paypal_link_includes_order_details() {
        let link = WhatsAppLink::new("50588888888");
        let mut buyer = BuyerInfo::new("Luis", "77770000");
        buyer.paypal_order_id = Some("ORDER-123".into());
        buyer.paypal_payer_id = Some("PAYER-456".into());

        let quote = PricingQuote {
            base_price: 70.0,
            base_price_usd: 1.92,
            paypal_fees: 0.39,
            total_usd: 2.30,
            total_cordobas: 85,
            breakdown: Default::default(),
        };
        let url = link.paypal_purchase(&[n("007")], &buyer, &quote);

        let parsed = reqwest::Url::parse(&url).unwrap();
        let (_, text) = parsed.query_pairs().find(|(k, _)| k == "text").unwrap();
        assert!(text.contains("ORDER-123"));
        assert!(text.contains("PAYER-456"));
        assert!(text.contains("₡85 ($2.30 USD)"));
        assert!(text.contains("$0.39 USD"));
    }
}
