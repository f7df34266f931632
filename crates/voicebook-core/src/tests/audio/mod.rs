mod capture;
mod engine;
mod take;
