use crate::{
    common::{command::Command, money::Money},
    domain::{
        catalog::{CatalogItem, ItemId},
        customer::{Customer, CustomerUpdate},
    },
};
use std::{io::Read, str::FromStr};

/// Upper bound on the units a single `sale` line may ask for. Each unit
/// becomes one sale line, so the request is expanded in memory.
pub const MAX_SALE_UNITS: u32 = 100_000;

/// Builds the CSV reader used for command scripts: no header row, records
/// of any width, trimmed fields and `#` comment lines.
pub fn script_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(input)
}

/// Reads shell commands, one per CSV record.
///
/// The first field names the command; the remaining fields are its
/// arguments. Errors carry the script line number.
///
/// # Examples
///
/// ```
/// use dealership_ledger::io::reader::{read_commands, script_reader};
/// use dealership_ledger::common::command::Command;
///
/// let script = "item_add,Honda,CL500,6790.00,3\n\
/// revenue\n";
/// let mut rdr = script_reader(script.as_bytes());
/// let commands: Vec<_> = read_commands(&mut rdr).collect();
///
/// assert!(matches!(commands[0], Ok(Command::AddItem { stock: 3, .. })));
/// assert!(matches!(commands[1], Ok(Command::Revenue)));
/// ```
pub fn read_commands<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<Command, String>> + '_ {
    rdr.records().map(|res| {
        let record = res.map_err(|e| e.to_string())?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let fields: Vec<&str> = record.iter().collect();
        parse_command(&fields).map_err(|e| format!("line {line}: {e}"))
    })
}

fn parse_command(fields: &[&str]) -> Result<Command, String> {
    let (keyword, args) = fields.split_first().ok_or("empty command")?;
    let keyword = keyword.to_ascii_lowercase();

    match keyword.as_str() {
        "customer_add" => {
            let [name, id, phone, email] = exact::<4>(&keyword, args)?;
            Ok(Command::AddCustomer {
                name: required("name", name)?,
                id: required("id", id)?,
                phone: required("phone", phone)?,
                email: required("email", email)?,
            })
        }
        "customer_update" => {
            let (id, rest) = args
                .split_first()
                .ok_or("customer_update needs an id")?;
            let optional = |i: usize| rest.get(i).filter(|s| !s.is_empty()).map(|s| s.to_string());
            Ok(Command::UpdateCustomer {
                id: required("id", id)?,
                update: CustomerUpdate {
                    name: optional(0),
                    phone: optional(1),
                    email: optional(2),
                },
            })
        }
        "customer_remove" => {
            let [id] = exact::<1>(&keyword, args)?;
            Ok(Command::RemoveCustomer {
                id: required("id", id)?,
            })
        }
        "customer_find" => {
            let [id] = exact::<1>(&keyword, args)?;
            Ok(Command::FindCustomer {
                id: required("id", id)?,
            })
        }
        "customer_list" => Ok(Command::ListCustomers {
            sorted: sorted_flag(args)?,
        }),
        "item_add" => {
            let [brand, model, price, stock] = exact::<4>(&keyword, args)?;
            let price = Money::from_str(price).map_err(|e| format!("invalid price {price:?}: {e}"))?;
            if price.is_negative() {
                return Err(format!("price must not be negative, got {price}"));
            }
            let stock: i64 = parse_number("stock", stock)?;
            if stock < 0 {
                return Err(format!("stock must not be negative, got {stock}"));
            }
            Ok(Command::AddItem {
                brand: required("brand", brand)?,
                model: required("model", model)?,
                price,
                stock,
            })
        }
        "item_search" => {
            let [query] = exact::<1>(&keyword, args)?;
            Ok(Command::SearchItems {
                query: query.to_string(),
            })
        }
        "item_list" => Ok(Command::ListItems {
            sorted: sorted_flag(args)?,
        }),
        "item_restock" => {
            let [index, units] = exact::<2>(&keyword, args)?;
            Ok(Command::Restock {
                index: parse_number("index", index)?,
                units: parse_number("units", units)?,
            })
        }
        "sale" => {
            let (customer, tokens) = args.split_first().ok_or("sale needs a customer id")?;
            let mut requested = Vec::new();
            let mut units: u32 = 0;
            for token in tokens.iter().filter(|t| !t.is_empty()) {
                let (id, quantity) = parse_item_token(token)?;
                units = units
                    .checked_add(quantity)
                    .filter(|&total| total <= MAX_SALE_UNITS)
                    .ok_or_else(|| format!("sale asks for more than {MAX_SALE_UNITS} units"))?;
                requested.push((id, quantity));
            }
            if requested.is_empty() {
                return Err("sale needs at least one item".into());
            }
            let items = requested
                .into_iter()
                .flat_map(|(id, quantity)| std::iter::repeat_n(id, quantity as usize))
                .collect();
            Ok(Command::Sell {
                customer: required("customer id", customer)?,
                items,
            })
        }
        "sales_list" => Ok(Command::ListSales {
            customer: args.first().filter(|s| !s.is_empty()).map(|s| s.to_string()),
        }),
        "revenue" => Ok(Command::Revenue),
        other => Err(format!("unknown command: {other}")),
    }
}

fn exact<'a, const N: usize>(keyword: &str, args: &[&'a str]) -> Result<[&'a str; N], String> {
    <[&str; N]>::try_from(args)
        .map_err(|_| format!("{keyword} takes {N} field(s), got {}", args.len()))
}

fn required(field: &str, value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err(format!("{field} must not be blank"));
    }
    Ok(value.to_string())
}

fn parse_number<T: FromStr>(field: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{field} is not a valid number: {value:?}"))
}

fn sorted_flag(args: &[&str]) -> Result<bool, String> {
    match args.first().copied() {
        None | Some("") => Ok(false),
        Some(flag) if flag.eq_ignore_ascii_case("sorted") => Ok(true),
        Some(other) => Err(format!("unexpected listing option: {other}")),
    }
}

/// `3` is one unit of item 3, `3:2` is two units.
fn parse_item_token(token: &str) -> Result<(ItemId, u32), String> {
    let (index, quantity) = match token.split_once(':') {
        Some((index, quantity)) => (index, parse_number::<u32>("quantity", quantity)?),
        None => (token, 1),
    };
    if quantity == 0 {
        return Err(format!("quantity must be at least 1 in {token:?}"));
    }
    Ok((ItemId(parse_number("item index", index)?), quantity))
}

#[derive(serde::Deserialize)]
/// Seed file row with headers `name,id,phone,email`.
struct CustomerRow {
    name: String,
    id: String,
    phone: String,
    email: String,
}

#[derive(serde::Deserialize)]
/// Seed file row with headers `brand,model,price,stock`.
struct ItemRow {
    brand: String,
    model: String,
    price: String,
    stock: i64,
}

/// Reads seed customers from a headed CSV file.
pub fn read_customers<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<Customer, String>> + '_ {
    rdr.deserialize::<CustomerRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;
        Ok(Customer::new(
            required("name", &row.name)?,
            required("id", &row.id)?,
            row.phone,
            row.email,
        ))
    })
}

/// Reads seed catalog items from a headed CSV file.
pub fn read_items<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<CatalogItem, String>> + '_ {
    rdr.deserialize::<ItemRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;
        let price = Money::from_str(&row.price).map_err(|e| {
            format!("invalid price {:?} for {} {}: {e}", row.price, row.brand, row.model)
        })?;
        if price.is_negative() {
            return Err(format!("negative price for {} {}", row.brand, row.model));
        }
        Ok(CatalogItem::new(row.brand, row.model, price, row.stock))
    })
}
