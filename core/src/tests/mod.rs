mod integer;
