pub mod thingspeak;
