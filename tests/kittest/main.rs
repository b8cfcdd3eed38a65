mod binding_wizard;
mod startup;
mod withdrawal;
mod zone_harness;
