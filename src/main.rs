#[macro_use]
extern crate rocket;

#[launch]
fn rocket() -> _ {
    cartes::rocket()
}
