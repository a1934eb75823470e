//! Conversions: order wire types ↔ Order domain types.

use super::wire::{self, CreateDraftRequest, OrderItemBody, OrderResponse};
use super::{ContactDetails, Order, OrderConversionError, OrderLine, OrderStatus, PaymentMethod};
use crate::shared::SalonId;
use rust_decimal::Decimal;

impl From<wire::OrderItemResponse> for OrderLine {
    fn from(item: wire::OrderItemResponse) -> Self {
        OrderLine {
            product_id: item.product_id,
            product_name: item.product_name,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

impl From<&OrderLine> for OrderItemBody {
    fn from(line: &OrderLine) -> Self {
        OrderItemBody {
            product_id: line.product_id.clone(),
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            price: line.price,
        }
    }
}

impl TryFrom<OrderResponse> for Order {
    type Error = OrderConversionError;

    fn try_from(resp: OrderResponse) -> Result<Self, Self::Error> {
        if resp.id.as_str().is_empty() {
            return Err(OrderConversionError::MissingId);
        }

        let status = match resp.status.as_deref() {
            Some(s) => s.parse::<OrderStatus>()?,
            None => OrderStatus::PendingPayment,
        };
        let payment_method = resp
            .payment_method
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(str::parse::<PaymentMethod>)
            .transpose()?;

        let lines: Vec<OrderLine> = resp.items.into_iter().map(Into::into).collect();
        let total_amount = resp
            .total_amount
            .unwrap_or_else(|| lines.iter().map(OrderLine::line_total).sum::<Decimal>());

        let salon_name = resp
            .salon_name
            .or_else(|| resp.salon_id.as_ref().and_then(|s| s.name().map(str::to_string)));

        Ok(Order {
            id: resp.id,
            merchant_order_id: resp.merchant_order_id,
            salon_id: resp.salon_id.map(|s| s.id().clone()),
            salon_name,
            contact: ContactDetails {
                customer_name: resp.customer_name,
                customer_phone: resp.customer_phone,
                additional_phone: resp.additional_phone.filter(|p| !p.trim().is_empty()),
                address: resp.address,
                city: resp.city,
            },
            lines,
            total_amount,
            payment_method,
            status,
            created_at: resp.created_at,
            status_date: resp.status_date.or(resp.returned_at).or(resp.cancelled_at),
        })
    }
}

impl CreateDraftRequest {
    pub fn new(salon_id: SalonId, contact: &ContactDetails) -> Self {
        let contact = contact.normalized();
        CreateDraftRequest {
            salon_id,
            customer_name: contact.customer_name,
            customer_phone: contact.customer_phone,
            additional_phone: contact.additional_phone,
            address: contact.address,
            city: contact.city,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(json: &str) -> Result<Order, OrderConversionError> {
        let resp: OrderResponse = serde_json::from_str(json).unwrap();
        resp.try_into()
    }

    #[test]
    fn test_converts_full_order() {
        let order = parse(
            r#"{
                "_id": "o1",
                "salonId": {"_id": "s1", "name": "Glow"},
                "customerName": "Ann",
                "customerPhone": "077",
                "additionalPhone": "",
                "address": "x",
                "city": "y",
                "items": [{"productId": "p1", "productName": "Oil", "quantity": 3, "price": 800}],
                "totalAmount": 2400,
                "paymentMethod": "Cash on Delivery",
                "status": "Returned",
                "returnedAt": "2024-03-05T08:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(order.salon_id.as_ref().unwrap().as_str(), "s1");
        assert_eq!(order.salon_name.as_deref(), Some("Glow"));
        assert_eq!(order.contact.additional_phone, None);
        assert_eq!(order.total_amount, dec!(2400));
        assert_eq!(order.payment_method, Some(PaymentMethod::CashOnDelivery));
        assert_eq!(order.status, OrderStatus::Returned);
        assert!(order.status_date.is_some());
    }

    #[test]
    fn test_draft_defaults() {
        let order = parse(r#"{"_id": "d1", "customerName": "Ann"}"#).unwrap();
        assert!(order.is_draft());
        assert_eq!(order.status, OrderStatus::PendingPayment);
        assert_eq!(order.total_amount, Decimal::ZERO);
        assert_eq!(order.payment_method, None);
    }

    #[test]
    fn test_missing_total_is_summed_from_lines() {
        let order = parse(
            r#"{"_id": "o2", "items": [
                {"productId": "a", "productName": "A", "quantity": 2, "price": 100},
                {"productId": "b", "productName": "B", "quantity": 1, "price": 250}
            ]}"#,
        )
        .unwrap();
        assert_eq!(order.total_amount, dec!(450));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = parse(r#"{"_id": "o3", "status": "Lost in transit"}"#).unwrap_err();
        assert!(matches!(err, OrderConversionError::UnknownStatus(_)));
    }

    #[test]
    fn test_draft_request_is_normalized() {
        let contact = ContactDetails::new(" Ann ", "077", "x", " Kandy").with_additional_phone(" ");
        let req = CreateDraftRequest::new(SalonId::from("s1"), &contact);
        assert_eq!(req.customer_name, "Ann");
        assert_eq!(req.city, "Kandy");
        assert_eq!(req.additional_phone, None);
    }
}
