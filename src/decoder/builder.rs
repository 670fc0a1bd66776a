use super::constants::{PROTOCOL_NAME, Variant};
use super::cursor::FieldCursor;
use super::error::DecodeError;
use super::timestamp::TimestampBuilder;
use crate::identity::IdentityResolver;
use crate::types::{ChannelContext, PositionRecord};

/// Turns GNX sentences into position records.
///
/// `Ok(None)` covers everything a noisy feed produces: sentences that match
/// neither variant, impossible dates, out-of-range coordinates and devices the resolver
/// does not know.
/// `Err` is reserved for disagreements between the patterns and this code.
pub struct GnxDecoder<R> {
    resolver: R,
}

impl<R: IdentityResolver> GnxDecoder<R> {
    #[must_use]
    pub fn new(resolver: R) -> Self {
        GnxDecoder { resolver }
    }

    pub fn decode(
        &self,
        sentence: &str,
        context: &ChannelContext,
    ) -> Result<Option<PositionRecord>, DecodeError> {
        let variant = Variant::classify(sentence);
        let pattern = variant.pattern().map_err(DecodeError::from)?;

        let Some(fields) = pattern.match_fields(sentence) else {
            return Ok(None);
        };
        let mut cursor = FieldCursor::new(&fields);

        let identifier = cursor.next_string()?;
        let Some(device_id) = self.resolver.resolve(identifier, context) else {
            return Ok(None);
        };

        let archive = (cursor.next_int()? == 1).then_some(true);

        let device_time = read_timestamp(&mut cursor)?;
        let fix_time = read_timestamp(&mut cursor)?;
        let valid = cursor.next_int()? != 0;
        let latitude = cursor.next_coordinate()?;
        let longitude = cursor.next_coordinate()?;

        let rfid = match variant {
            Variant::Tagged => {
                // card validity
                cursor.skip()?;
                Some(cursor.next_string()?.to_string())
            }
            Variant::Generic => None,
        };
        cursor.finish()?;

        let (Some(device_time), Some(fix_time)) = (device_time, fix_time) else {
            return Ok(None);
        };
        // Overlong degree values overflow to infinity.
        if !latitude.is_finite() || !longitude.is_finite() {
            return Ok(None);
        }

        Ok(Some(PositionRecord {
            protocol: PROTOCOL_NAME,
            device_id,
            device_time,
            fix_time,
            valid,
            latitude,
            longitude,
            archive,
            rfid,
        }))
    }
}

/// Time triple then day-month-year triple.
fn read_timestamp(
    cursor: &mut FieldCursor<'_, '_, '_>,
) -> Result<Option<chrono::DateTime<chrono::FixedOffset>>, DecodeError> {
    let (hour, minute, second) = (cursor.next_int()?, cursor.next_int()?, cursor.next_int()?);
    let (day, month, year) = (cursor.next_int()?, cursor.next_int()?, cursor.next_int()?);
    Ok(TimestampBuilder::gnx()
        .time(hour, minute, second)
        .date_reverse(day, month, year)
        .build())
}
