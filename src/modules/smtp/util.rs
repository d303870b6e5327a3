use rand::Rng;

use crate::utc_now;

pub fn generate_message_id() -> String {
    let random_bytes: [u8; 16] = rand::rng().random();
    let random_id = hex::encode(random_bytes);
    let timestamp_millis = utc_now!();
    format!("{}.{}@bulkmailer", timestamp_millis, random_id)
}
