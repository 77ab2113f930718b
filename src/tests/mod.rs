mod addressing;
mod dlc;
mod packet;
