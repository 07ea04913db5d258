// Resume analysis endpoint: multipart form → extraction → scoring.

pub mod handlers;
