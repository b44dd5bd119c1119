use crate::models::BookingRecord;

const RULE_WIDTH: usize = 40;

/// Printable ticket for a confirmed booking.
pub fn render_ticket(booking: &BookingRecord) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let lines = [
        String::new(),
        rule.clone(),
        "            MOVIE TICKET".to_string(),
        rule.clone(),
        format!("Name       : {}", booking.name),
        format!("Seat       : Row {} - Seat {}", booking.row, booking.seat),
        format!("Student    : {}", booking.student_label()),
        format!("Price      : {}", booking.price),
        format!("Time       : {}", booking.formatted_timestamp()),
        rule,
        String::new(),
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn ticket_lists_booking_details() {
        let booking = BookingRecord {
            name: "Asha".to_string(),
            row: 2,
            seat: 7,
            is_student: true,
            price: 80,
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(18, 5, 7)
                .unwrap(),
        };

        let ticket = render_ticket(&booking);

        assert!(ticket.contains("MOVIE TICKET"));
        assert!(ticket.contains("Name       : Asha\n"));
        assert!(ticket.contains("Seat       : Row 2 - Seat 7\n"));
        assert!(ticket.contains("Student    : yes\n"));
        assert!(ticket.contains("Price      : 80\n"));
        assert!(ticket.contains("Time       : 2024-03-09 18:05:07\n"));
        assert_eq!(ticket.matches(&"=".repeat(40)).count(), 3);
    }
}
