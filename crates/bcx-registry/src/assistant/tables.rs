use super::domain::Sector;

/// Baseline integrity score per sector before vintage and scale adjustments.
pub(crate) fn sector_base_score(sector: &Sector) -> i32 {
    match sector {
        Sector::BlueCarbon => 95,
        Sector::Afforestation => 88,
        Sector::RenewableEnergy => 90,
        Sector::MethaneCapture => 80,
        Sector::EnergyEfficiency => 85,
        Sector::SoilCarbon => 78,
        Sector::WasteManagement => 72,
        Sector::Other(_) => 75,
    }
}

/// Baseline credit price (INR) per sector.
pub(crate) fn sector_base_price(sector: &Sector) -> f64 {
    match sector {
        Sector::BlueCarbon => 1150.0,
        Sector::Afforestation => 680.0,
        Sector::RenewableEnergy => 820.0,
        Sector::MethaneCapture => 900.0,
        Sector::EnergyEfficiency => 720.0,
        Sector::SoilCarbon => 640.0,
        Sector::WasteManagement => 680.0,
        Sector::Other(_) => 750.0,
    }
}

/// Rounds half-way values toward positive infinity.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Formats an integer with Indian digit grouping (`12,34,567`).
pub(crate) fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_the_indian_way() {
        assert_eq!(group_indian(0), "0");
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(1000), "1,000");
        assert_eq!(group_indian(180000), "1,80,000");
        assert_eq!(group_indian(1234567), "12,34,567");
        assert_eq!(group_indian(123456789), "12,34,56,789");
    }

    #[test]
    fn rounds_halves_upward() {
        assert_eq!(round_half_up(981.2), 981);
        assert_eq!(round_half_up(833.85), 834);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }

    #[test]
    fn unknown_sectors_use_fallback_tables() {
        let other = Sector::Other("Foo".to_string());
        assert_eq!(sector_base_score(&other), 75);
        assert_eq!(sector_base_price(&other), 750.0);
    }
}
