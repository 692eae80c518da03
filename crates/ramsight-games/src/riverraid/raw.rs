use ramsight_core::{RamSnapshot, RawField};

use super::layout::{self, enemy, hud, missile, player, terrain};

/// Reads the River Raid fields straight from RAM.
#[must_use]
pub fn raw_fields(ram: &RamSnapshot) -> Vec<RawField> {
    vec![
        RawField::new(
            "objects_pos",
            ram.bytes::<{ enemy::SLOTS }>(enemy::LANE).as_slice(),
        ),
        RawField::new(
            "object_size",
            ram.bytes::<{ enemy::SLOTS }>(enemy::SIZE).as_slice(),
        ),
        RawField::new(
            "object_type",
            ram.bytes::<{ enemy::SLOTS }>(enemy::TYPE).as_slice(),
        ),
        RawField::new(
            "grass_layout",
            ram.bytes::<{ terrain::SECTIONS }>(terrain::GRASS_LAYOUT).as_slice(),
        ),
        RawField::new(
            "water_width",
            ram.bytes::<{ terrain::SECTIONS }>(terrain::WATER_WIDTH).as_slice(),
        ),
        RawField::new("player_x", ram[player::X]),
        RawField::new("missile_x", ram[missile::X]),
        RawField::new("missile_y", ram[missile::Y]),
        RawField::new("fuel_meter_high", ram[hud::FUEL_HIGH]),
        RawField::new("fuel_meter_low", ram[hud::FUEL_LOW]),
        RawField::new("lives", lives(ram)),
        RawField::new("score", layout::SCORE.decode(ram)),
        RawField::new("fuel_meter", fuel_percent(ram)),
    ]
}

pub(crate) fn lives(ram: &RamSnapshot) -> u32 {
    u32::from(ram[hud::LIVES] / 8) + 1
}

pub(crate) fn fuel_percent(ram: &RamSnapshot) -> f64 {
    f64::from(ram[hud::FUEL_HIGH]) / 255.0 * 100.0
}

#[cfg(test)]
mod tests {
    use ramsight_core::{RAM_SIZE, RawValue};

    use super::*;

    #[test]
    fn test_raw_fields() {
        let mut bytes = [0; RAM_SIZE];
        bytes[20..26].copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        bytes[32] = 7;
        bytes[player::X] = 76;
        bytes[hud::LIVES] = 16;
        bytes[hud::FUEL_HIGH] = 255;
        let score = [88, 88, 88, 24, 16, 8];
        for (offset, byte) in [77, 79, 81, 83, 85, 87].into_iter().zip(score) {
            bytes[offset] = byte;
        }
        let fields = raw_fields(&RamSnapshot::new(bytes));
        let field = |name: &str| {
            fields
                .iter()
                .find(|field| field.name == name)
                .map(|field| field.value.clone())
                .unwrap()
        };

        assert_eq!(field("objects_pos"), RawValue::Bytes(vec![1, 2, 3, 4, 5, 6]));
        assert_eq!(field("object_type"), RawValue::Bytes(vec![7, 0, 0, 0, 0, 0]));
        assert_eq!(field("player_x"), RawValue::Int(76));
        assert_eq!(field("lives"), RawValue::Int(3));
        assert_eq!(field("score"), RawValue::Int(321));
        assert_eq!(field("fuel_meter"), RawValue::Float(100.0));
    }
}
